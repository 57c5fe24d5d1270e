use crate::theme::Theme;

pub fn render_index(date: &str) -> String {
    let keys: Vec<&str> = Theme::ALL.iter().map(|theme| theme.key()).collect();
    let themes = serde_json::to_string(&keys).unwrap_or_else(|_| "[]".to_string());
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{THEMES}}", &themes)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>heatmaps.fun</title>
  <style>
    :root {
      --bg: #f6f7f9;
      --card: #ffffff;
      --ink: #1c2128;
      --muted: #6b7280;
      --accent: #8250df;
      --accent-dark: #6639ba;
      --border: #e2e5ea;
      --danger: #c93c37;
      --ok: #2d7a4b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      padding: 32px 16px 64px;
    }

    .page {
      width: min(760px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      text-align: center;
    }

    h1 {
      margin: 0 0 4px;
      font-size: 2.2rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .today-line {
      margin-top: 6px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 20px;
      box-shadow: 0 1px 3px rgba(28, 33, 40, 0.06);
    }

    .add-row {
      display: flex;
      gap: 10px;
    }

    input[type="text"],
    input[type="number"],
    select {
      font: inherit;
      padding: 8px 10px;
      border: 1px solid var(--border);
      border-radius: 8px;
      background: white;
      color: var(--ink);
    }

    .add-row input {
      flex: 1;
    }

    button {
      font: inherit;
      font-weight: 600;
      border: 1px solid var(--border);
      border-radius: 8px;
      background: white;
      color: var(--ink);
      padding: 8px 14px;
      cursor: pointer;
    }

    button:hover {
      border-color: var(--accent);
    }

    button.primary {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
    }

    button.primary:hover {
      background: var(--accent-dark);
    }

    button.danger {
      color: var(--danger);
    }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .tracker-head {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
      margin-bottom: 14px;
    }

    .tracker-title {
      margin: 0;
      font-size: 1.3rem;
    }

    .tracker-actions {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    .grid-wrap {
      display: flex;
      justify-content: center;
      padding: 8px 0 14px;
      overflow-x: auto;
    }

    .heatmap {
      display: flex;
      gap: 2px;
    }

    .heatmap .col {
      display: flex;
      flex-direction: column;
      gap: 2px;
    }

    .cell {
      width: 12px;
      height: 12px;
      border-radius: 2px;
    }

    .cell.today {
      outline: 2px solid #4493f8;
      outline-offset: 1px;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      border-top: 1px solid var(--border);
      padding-top: 14px;
    }

    .value-group {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .value-group .value {
      min-width: 2ch;
      text-align: center;
      font-weight: 700;
      font-size: 1.1rem;
    }

    .streak {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .status {
      min-height: 1.2em;
      text-align: center;
      font-size: 0.95rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: var(--ok);
    }

    .modal-backdrop {
      position: fixed;
      inset: 0;
      background: rgba(28, 33, 40, 0.45);
      display: none;
      align-items: center;
      justify-content: center;
      padding: 16px;
    }

    .modal-backdrop.open {
      display: flex;
    }

    .modal {
      background: white;
      border-radius: 12px;
      padding: 24px;
      width: min(380px, 100%);
      display: grid;
      gap: 16px;
    }

    .modal h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .modal .muted {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .streak-banner {
      text-align: center;
      background: #f3ecff;
      border-radius: 10px;
      padding: 12px;
    }

    .streak-banner strong {
      font-size: 1.5rem;
    }

    .goal-bar {
      height: 8px;
      background: var(--border);
      border-radius: 999px;
      overflow: hidden;
    }

    .goal-bar div {
      height: 100%;
      background: var(--accent);
      width: 0;
      transition: width 200ms ease;
    }

    .quick-row {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 8px;
    }

    .modal-buttons {
      display: flex;
      gap: 10px;
    }

    .modal-buttons button {
      flex: 1;
    }

    .modal input {
      text-align: center;
      font-size: 1.1rem;
    }
  </style>
</head>
<body>
  <div class="page">
    <header>
      <h1>heatmaps.fun</h1>
      <p class="subtitle">Track anything with beautiful heatmaps</p>
      <p class="today-line">Today: {{DATE}}</p>
    </header>

    <section class="card">
      <form id="add-form" class="add-row">
        <input type="text" id="add-title" placeholder="Enter heatmap name..." />
        <button class="primary" type="submit">Add Heatmap</button>
      </form>
    </section>

    <div id="trackers"></div>

    <div class="status" id="status"></div>
  </div>

  <div class="modal-backdrop" id="modal-backdrop">
    <div class="modal">
      <h2>Daily Check-in</h2>
      <p class="muted">Update your progress for <span id="modal-title"></span> today</p>
      <div class="streak-banner">
        <strong id="modal-streak">0</strong> day streak
        <p class="muted" id="modal-motivation"></p>
      </div>
      <div>
        <div class="muted" id="modal-goal-label"></div>
        <div class="goal-bar"><div id="modal-goal-fill"></div></div>
      </div>
      <input type="number" id="modal-value" min="0" max="4" />
      <div class="quick-row" id="modal-quick"></div>
      <div class="modal-buttons">
        <button type="button" id="modal-skip">Skip Today</button>
        <button type="button" class="primary" id="modal-submit">Update</button>
      </div>
    </div>
  </div>

  <script>
    const trackersEl = document.getElementById('trackers');
    const statusEl = document.getElementById('status');
    const addForm = document.getElementById('add-form');
    const addTitle = document.getElementById('add-title');

    const backdrop = document.getElementById('modal-backdrop');
    const modalTitle = document.getElementById('modal-title');
    const modalStreak = document.getElementById('modal-streak');
    const modalMotivation = document.getElementById('modal-motivation');
    const modalGoalLabel = document.getElementById('modal-goal-label');
    const modalGoalFill = document.getElementById('modal-goal-fill');
    const modalValue = document.getElementById('modal-value');
    const modalQuick = document.getElementById('modal-quick');
    const modalSkip = document.getElementById('modal-skip');
    const modalSubmit = document.getElementById('modal-submit');

    const THEMES = {{THEMES}};

    let trackers = [];
    const windows = {};
    let modalId = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.json();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    const renderCards = () => {
      trackersEl.innerHTML = '';
      trackers.forEach((tracker) => {
        const card = document.createElement('section');
        card.className = 'card';
        card.dataset.id = tracker.id;

        const head = document.createElement('div');
        head.className = 'tracker-head';

        const title = document.createElement('h2');
        title.className = 'tracker-title';
        title.textContent = tracker.title;

        const actions = document.createElement('div');
        actions.className = 'tracker-actions';

        const themeSelect = document.createElement('select');
        THEMES.forEach((key) => {
          const option = document.createElement('option');
          option.value = key;
          option.textContent = key;
          if (key === tracker.theme) {
            option.selected = true;
          }
          themeSelect.appendChild(option);
        });
        themeSelect.addEventListener('change', () => {
          setTheme(tracker.id, themeSelect.value).catch((err) => setStatus(err.message, 'error'));
        });

        const editBtn = document.createElement('button');
        editBtn.textContent = 'Rename';
        editBtn.addEventListener('click', () => startRename(card, tracker));

        actions.appendChild(themeSelect);
        actions.appendChild(editBtn);

        if (trackers.length > 1) {
          const deleteBtn = document.createElement('button');
          deleteBtn.className = 'danger';
          deleteBtn.textContent = 'Delete';
          deleteBtn.addEventListener('click', () => {
            deleteTracker(tracker.id).catch((err) => setStatus(err.message, 'error'));
          });
          actions.appendChild(deleteBtn);
        }

        head.appendChild(title);
        head.appendChild(actions);

        const gridWrap = document.createElement('div');
        gridWrap.className = 'grid-wrap';
        const heatmap = document.createElement('div');
        heatmap.className = 'heatmap';
        heatmap.id = 'heatmap-' + tracker.id;
        gridWrap.appendChild(heatmap);

        const controls = document.createElement('div');
        controls.className = 'controls';

        const valueGroup = document.createElement('div');
        valueGroup.className = 'value-group';
        const minus = document.createElement('button');
        minus.textContent = '-';
        minus.id = 'minus-' + tracker.id;
        const value = document.createElement('span');
        value.className = 'value';
        value.id = 'value-' + tracker.id;
        value.textContent = '0';
        const plus = document.createElement('button');
        plus.textContent = '+';
        plus.id = 'plus-' + tracker.id;
        minus.addEventListener('click', () => {
          checkin(tracker.id, { action: 'decrement' }).catch((err) => setStatus(err.message, 'error'));
        });
        plus.addEventListener('click', () => {
          checkin(tracker.id, { action: 'increment' }).catch((err) => setStatus(err.message, 'error'));
        });
        valueGroup.appendChild(minus);
        valueGroup.appendChild(value);
        valueGroup.appendChild(plus);

        const streak = document.createElement('span');
        streak.className = 'streak';
        streak.id = 'streak-' + tracker.id;

        const checkinBtn = document.createElement('button');
        checkinBtn.className = 'primary';
        checkinBtn.textContent = 'Check in';
        checkinBtn.addEventListener('click', () => openModal(tracker.id));

        controls.appendChild(valueGroup);
        controls.appendChild(streak);
        controls.appendChild(checkinBtn);

        card.appendChild(head);
        card.appendChild(gridWrap);
        card.appendChild(controls);
        trackersEl.appendChild(card);

        if (windows[tracker.id]) {
          paintCard(tracker.id);
        }
      });
    };

    const startRename = (card, tracker) => {
      const head = card.querySelector('.tracker-head');
      head.innerHTML = '';

      const input = document.createElement('input');
      input.type = 'text';
      input.value = tracker.title;

      const save = document.createElement('button');
      save.className = 'primary';
      save.textContent = 'Save';
      const cancel = document.createElement('button');
      cancel.textContent = 'Cancel';

      const finish = () => renderCards();
      save.addEventListener('click', () => {
        renameTracker(tracker.id, input.value).catch((err) => setStatus(err.message, 'error'));
      });
      cancel.addEventListener('click', finish);
      input.addEventListener('keydown', (event) => {
        if (event.key === 'Enter') {
          save.click();
        }
      });

      head.appendChild(input);
      head.appendChild(save);
      head.appendChild(cancel);
      input.focus();
    };

    const paintCard = (id) => {
      const data = windows[id];
      const heatmap = document.getElementById('heatmap-' + id);
      if (!data || !heatmap) {
        return;
      }

      heatmap.innerHTML = '';
      const columns = {};
      data.cells.forEach((cell) => {
        if (!columns[cell.column]) {
          const col = document.createElement('div');
          col.className = 'col';
          columns[cell.column] = col;
          heatmap.appendChild(col);
        }
        const square = document.createElement('div');
        square.className = cell.today ? 'cell today' : 'cell';
        square.style.backgroundColor = cell.color;
        square.title = cell.date + ': ' + cell.value + (cell.today ? ' (Today)' : '');
        columns[cell.column].appendChild(square);
      });

      document.getElementById('value-' + id).textContent = data.today_value;
      document.getElementById('streak-' + id).textContent = data.streak + ' day streak';
      document.getElementById('minus-' + id).disabled = data.today_value <= 0;
      document.getElementById('plus-' + id).disabled = data.today_value >= 4;
    };

    const loadTrackers = async () => {
      const data = await api('/api/trackers');
      trackers = data.trackers;
      renderCards();
      await Promise.all(trackers.map((tracker) => loadWindow(tracker.id)));
    };

    const loadWindow = async (id) => {
      windows[id] = await api('/api/trackers/' + id + '/window');
      paintCard(id);
    };

    const refreshAll = () => {
      loadTrackers().catch((err) => setStatus(err.message, 'error'));
    };

    const addTracker = async (title) => {
      const data = await post('/api/trackers', { title });
      trackers = data.trackers;
      renderCards();
      await Promise.all(trackers.map((tracker) => loadWindow(tracker.id)));
    };

    const renameTracker = async (id, title) => {
      const data = await post('/api/trackers/' + id + '/rename', { title });
      trackers = data.trackers;
      renderCards();
    };

    const deleteTracker = async (id) => {
      const res = await fetch('/api/trackers/' + id, { method: 'DELETE' });
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      const data = await res.json();
      delete windows[id];
      trackers = data.trackers;
      renderCards();
    };

    const checkin = async (id, body) => {
      windows[id] = await post('/api/trackers/' + id + '/checkin', body);
      paintCard(id);
      if (modalId === id) {
        fillModal();
      }
    };

    const setTheme = async (id, theme) => {
      windows[id] = await post('/api/trackers/' + id + '/theme', { theme });
      const tracker = trackers.find((t) => t.id === id);
      if (tracker) {
        tracker.theme = windows[id].theme;
      }
      paintCard(id);
    };

    const motivation = (streak) => {
      if (streak === 0) return 'Start your streak today!';
      if (streak < 7) return 'Great start! Keep it going.';
      if (streak < 30) return 'Amazing! You are on fire.';
      return 'Incredible! You are unstoppable!';
    };

    const fillModal = () => {
      const data = windows[modalId];
      if (!data) {
        return;
      }
      modalTitle.textContent = data.title;
      modalStreak.textContent = data.streak;
      modalMotivation.textContent = motivation(data.streak);
      modalValue.value = data.today_value;
      updateGoal();
    };

    const updateGoal = () => {
      const data = windows[modalId];
      if (!data) {
        return;
      }
      const entered = parseInt(modalValue.value, 10) || 0;
      const pct = Math.max(0, Math.min(100, Math.round((entered / data.goal) * 100)));
      modalGoalLabel.textContent = "Today's goal: " + data.goal + ' (' + pct + '%)';
      modalGoalFill.style.width = pct + '%';
    };

    const openModal = (id) => {
      modalId = id;
      fillModal();
      backdrop.classList.add('open');
      modalValue.focus();
    };

    const closeModal = () => {
      modalId = null;
      backdrop.classList.remove('open');
    };

    modalQuick.innerHTML = '';
    [1, 2, 3, 4].forEach((quick) => {
      const btn = document.createElement('button');
      btn.type = 'button';
      btn.textContent = quick;
      btn.addEventListener('click', () => {
        modalValue.value = quick;
        updateGoal();
      });
      modalQuick.appendChild(btn);
    });

    modalValue.addEventListener('input', updateGoal);

    // Cancel discards the draft only; committed values stay.
    modalSkip.addEventListener('click', closeModal);
    backdrop.addEventListener('click', (event) => {
      if (event.target === backdrop) {
        closeModal();
      }
    });

    modalSubmit.addEventListener('click', async () => {
      if (modalId === null) {
        return;
      }
      modalSubmit.disabled = true;
      modalSubmit.textContent = 'Updating...';
      try {
        const value = parseInt(modalValue.value, 10) || 0;
        await checkin(modalId, { action: 'set', value });
        // Brief pause so the update is visible before the modal closes.
        await new Promise((resolve) => setTimeout(resolve, 500));
        closeModal();
        setStatus('Saved', 'ok');
        setTimeout(() => setStatus('', ''), 1200);
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        modalSubmit.disabled = false;
        modalSubmit.textContent = 'Update';
      }
    });

    addForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const title = addTitle.value;
      addTitle.value = '';
      addTracker(title).catch((err) => setStatus(err.message, 'error'));
    });

    // A session left open across midnight picks up the new day on focus.
    window.addEventListener('focus', refreshAll);

    refreshAll();
  </script>
</body>
</html>
"##;
