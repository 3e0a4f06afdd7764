pub fn render_index(today: &str) -> String {
    INDEX_HTML.replace("{{TODAY}}", today)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Activity Log</title>
  <style>
    :root {
      --bg: #101412;
      --ink: #b8f5c4;
      --dim: #5e8a67;
      --accent: #ffd166;
      --error: #ff6b6b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "IBM Plex Mono", "Courier New", monospace;
      display: grid;
      place-items: start center;
      padding: 32px 16px;
    }

    .app {
      width: min(720px, 100%);
      display: grid;
      gap: 20px;
    }

    nav {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    button {
      font: inherit;
      color: var(--bg);
      background: var(--ink);
      border: none;
      padding: 6px 12px;
      cursor: pointer;
    }

    button.secondary {
      background: var(--dim);
    }

    input {
      font: inherit;
      color: var(--ink);
      background: transparent;
      border: 1px solid var(--dim);
      padding: 6px 8px;
      width: 100%;
    }

    form {
      display: grid;
      gap: 10px;
    }

    .hidden {
      display: none;
    }

    #screen {
      white-space: pre-wrap;
      line-height: 1.5;
      min-height: 200px;
    }

    .activity-line {
      cursor: pointer;
    }

    .activity-line:hover {
      color: var(--accent);
    }

    .status {
      min-height: 1.2em;
      color: var(--accent);
    }

    .status[data-tone="error"] {
      color: var(--error);
    }
  </style>
</head>
<body>
  <main class="app">
    <form id="user-form">
      <label>USER <input id="username" autocomplete="username" placeholder="username" /></label>
      <nav>
        <button type="submit">Use</button>
        <button type="button" class="secondary" id="create-user">Create</button>
      </nav>
    </form>

    <nav id="menu">
      <button data-action="log">Log Activity</button>
      <button data-action="history">History</button>
      <button data-action="stats">Statistics</button>
    </nav>

    <form id="activity-form" class="hidden">
      <input id="activity-type" placeholder="activity" />
      <input id="activity-duration" type="number" min="0" max="10080" step="1" placeholder="minutes" />
      <input id="activity-distance" type="number" min="0" step="0.01" placeholder="distance (km)" />
      <input id="activity-date" type="date" max="{{TODAY}}" value="{{TODAY}}" />
      <input id="activity-notes" placeholder="notes" />
      <nav>
        <button type="submit" id="save-activity">Add Activity</button>
        <button type="button" class="secondary" id="cancel-activity">Cancel</button>
        <button type="button" class="secondary hidden" id="delete-activity">Delete</button>
      </nav>
    </form>

    <div id="screen"></div>
    <div class="status" id="status"></div>
  </main>

  <script>
    const TODAY = '{{TODAY}}';
    const screen = document.getElementById('screen');
    const statusEl = document.getElementById('status');
    const userInput = document.getElementById('username');
    const form = document.getElementById('activity-form');
    const fields = {
      type: document.getElementById('activity-type'),
      duration: document.getElementById('activity-duration'),
      distance: document.getElementById('activity-distance'),
      date: document.getElementById('activity-date'),
      notes: document.getElementById('activity-notes')
    };
    const saveBtn = document.getElementById('save-activity');
    const deleteBtn = document.getElementById('delete-activity');

    let username = '';
    let editing = null;
    let activities = [];

    const setStatus = (message, tone) => {
      statusEl.textContent = message || '';
      statusEl.dataset.tone = tone || '';
    };

    const api = async (path, options = {}) => {
      const res = await fetch(`/api/users/${encodeURIComponent(username)}${path}`, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const escapeHtml = (text) => String(text).replace(/[&<>"]/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;' })[c]);

    const describe = (a, withDate) => {
      const dist = a.distance != null ? ` - ${a.distance}` : '';
      const notes = a.notes ? ` (${a.notes})` : '';
      const base = withDate ? `${a.day_label} - ${a.type}` : a.type;
      return `&gt; ${escapeHtml(base)} - ${a.duration} min${escapeHtml(dist + notes)}`;
    };

    const showForm = (activity) => {
      editing = activity || null;
      form.classList.remove('hidden');
      screen.innerHTML = '';
      fields.type.value = activity ? activity.type : '';
      fields.duration.value = activity ? activity.duration : '';
      fields.distance.value = activity && activity.distance != null ? activity.distance : '';
      fields.date.value = activity && activity.date ? activity.date : TODAY;
      fields.notes.value = activity && activity.notes ? activity.notes : '';
      saveBtn.textContent = activity ? 'Save Changes' : 'Add Activity';
      deleteBtn.classList.toggle('hidden', !activity);
    };

    const hideForm = () => {
      editing = null;
      form.classList.add('hidden');
    };

    const showHistory = async () => {
      hideForm();
      const history = await api('/history');
      const groups = [
        [`TODAY - ${history.today_label}`, history.today_entries, false, true],
        [`YESTERDAY - ${history.yesterday_label}`, history.yesterday_entries, false, false],
        ['LAST 7 DAYS', history.last_7_days, true, false],
        ['OLDER', history.older, true, false]
      ];
      activities = groups.flatMap(([, entries]) => entries);
      if (!activities.length) {
        screen.textContent = 'No history.';
        return;
      }
      let html = '';
      for (const [title, entries, withDate, always] of groups) {
        if (!entries.length && !always) continue;
        html += `${escapeHtml(title)}<br>`;
        if (!entries.length) html += '(none)<br>';
        for (const a of entries) {
          html += `<div class="activity-line" data-id="${a.id}">${describe(a, withDate)}</div>`;
        }
        html += '<br>';
      }
      screen.innerHTML = html;
    };

    const showStats = async (notice) => {
      hideForm();
      const stats = await api('/stats');
      const lines = [
        notice || '',
        'STREAKS',
        `Current streak: ${stats.current_streak} day(s)`,
        `Best streak: ${stats.best_streak} day(s)`,
        '',
        `Total moving: ${stats.total_moving}`,
        `Top day: ${stats.top_day_minutes} min`,
        `Top week: ${stats.top_week_minutes} min`,
        `Health: ${stats.health}`,
        '',
        'TOTALS BY TYPE',
        ...stats.type_lines
      ];
      screen.textContent = lines.join('\n').trim();
    };

    const run = (task) => task().then(() => setStatus('')).catch((err) => setStatus(err.message, 'error'));

    document.getElementById('user-form').addEventListener('submit', (event) => {
      event.preventDefault();
      username = userInput.value.trim().toLowerCase();
      run(() => showStats());
    });

    document.getElementById('create-user').addEventListener('click', () => {
      run(async () => {
        const res = await fetch('/api/users', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ username: userInput.value })
        });
        if (!res.ok) throw new Error(await res.text());
        username = (await res.json()).username;
        userInput.value = username;
        showForm();
      });
    });

    document.getElementById('menu').addEventListener('click', (event) => {
      const action = event.target.dataset.action;
      if (!action || !username) return;
      if (action === 'log') showForm();
      if (action === 'history') run(showHistory);
      if (action === 'stats') run(() => showStats());
    });

    fields.date.addEventListener('input', () => {
      if (fields.date.value > fields.date.max) fields.date.value = fields.date.max;
    });

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const body = JSON.stringify({
        date: fields.date.value || TODAY,
        type: fields.type.value.trim(),
        duration: fields.duration.value === '' ? null : Number(fields.duration.value),
        distance: fields.distance.value.trim() === '' ? null : Number(fields.distance.value),
        notes: fields.notes.value
      });
      run(async () => {
        if (editing) {
          await api(`/activities/${editing.id}`, { method: 'PUT', body });
          await showHistory();
          setStatus('Activity updated.');
        } else {
          await api('/activities', { method: 'POST', body });
          await showStats('Activity logged.');
        }
      });
    });

    document.getElementById('cancel-activity').addEventListener('click', () => {
      const wasEditing = !!editing;
      hideForm();
      if (wasEditing) run(showHistory);
    });

    deleteBtn.addEventListener('click', () => {
      if (!editing) return;
      const id = editing.id;
      run(async () => {
        await api(`/activities/${id}`, { method: 'DELETE' });
        await showHistory();
        setStatus('Activity deleted.');
      });
    });

    screen.addEventListener('click', (event) => {
      const row = event.target.closest('.activity-line');
      if (!row) return;
      const activity = activities.find((a) => String(a.id) === row.dataset.id);
      if (activity) showForm(activity);
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_caps_date_input_at_today() {
        let html = render_index("2024-01-03");
        assert!(html.contains(r#"max="2024-01-03""#));
        assert!(html.contains("const TODAY = '2024-01-03';"));
        assert!(!html.contains("{{TODAY}}"));
    }
}
