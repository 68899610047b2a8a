use crate::models::SummaryResponse;

pub fn render_index(summary: &SummaryResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &summary.date)
        .replace("{{LIMIT}}", &summary.calorie_limit.to_string())
        .replace("{{TOTAL}}", &summary.total_calories.to_string())
        .replace("{{CONSUMED}}", &summary.consumed.to_string())
        .replace("{{BURNED}}", &summary.burned.to_string())
        .replace("{{REMAINING}}", &summary.remaining.to_string())
        .replace("{{PROGRESS}}", &format!("{:.1}", summary.progress_percent))
        .replace("{{OVER}}", if summary.over_limit { "over" } else { "" })
}


const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Tracalorie</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6ef;
      --bg-2: #bfe3c8;
      --ink: #23302a;
      --accent: #2f8f5b;
      --accent-2: #2f4858;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f4e6 60%, #f4faf5 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat.remaining.over {
      background: #fbe3df;
    }

    .stat.remaining.over .value {
      color: var(--danger);
    }

    .progress {
      height: 22px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .progress-bar {
      height: 100%;
      background: var(--accent);
      transition: width 300ms ease;
    }

    .progress-bar.over {
      background: var(--danger);
    }

    .columns {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 24px;
    }

    .column {
      display: grid;
      gap: 14px;
      align-content: start;
    }

    form.entry {
      display: grid;
      grid-template-columns: 1fr 110px auto;
      gap: 8px;
    }

    input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
      background: white;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: var(--accent);
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    button.secondary {
      background: var(--accent-2);
    }

    button.danger {
      background: var(--danger);
    }

    .items {
      display: grid;
      gap: 8px;
    }

    .item {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
      background: white;
      border-radius: 14px;
      padding: 10px 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .item .name {
      flex: 1;
      font-weight: 500;
    }

    .item .calories {
      font-weight: 600;
      color: white;
      background: var(--accent);
      border-radius: 10px;
      padding: 4px 12px;
    }

    .item.workout .calories {
      background: var(--accent-2);
    }

    .item button {
      padding: 4px 10px;
      background: var(--danger);
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .toolbar form {
      display: flex;
      gap: 8px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      form.entry {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Tracalorie</h1>
        <p class="subtitle">Log meals and workouts against your daily limit.</p>
      </div>
      <span id="date" class="subtitle">{{DATE}}</span>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Daily limit</span>
        <span id="calories-limit" class="value">{{LIMIT}}</span>
      </div>
      <div class="stat">
        <span class="label">Net calories</span>
        <span id="calories-total" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Consumed</span>
        <span id="calories-consumed" class="value">{{CONSUMED}}</span>
      </div>
      <div class="stat">
        <span class="label">Burned</span>
        <span id="calories-burned" class="value">{{BURNED}}</span>
      </div>
      <div id="remaining-card" class="stat remaining {{OVER}}">
        <span class="label">Remaining</span>
        <span id="calories-remaining" class="value">{{REMAINING}}</span>
      </div>
    </section>

    <div class="progress">
      <div id="calorie-progress" class="progress-bar {{OVER}}" style="width: {{PROGRESS}}%"></div>
    </div>

    <section class="columns">
      <div class="column">
        <h2>Meals</h2>
        <form id="meal-form" class="entry">
          <input id="meal-name" type="text" placeholder="Meal name" autocomplete="off" />
          <input id="meal-calories" type="number" min="0" placeholder="Calories" />
          <button type="submit">Add</button>
        </form>
        <input id="filter-meals" type="search" placeholder="Filter meals" />
        <div id="meal-items" class="items"></div>
      </div>
      <div class="column">
        <h2>Workouts</h2>
        <form id="workout-form" class="entry">
          <input id="workout-name" type="text" placeholder="Workout name" autocomplete="off" />
          <input id="workout-calories" type="number" min="0" placeholder="Calories" />
          <button class="secondary" type="submit">Add</button>
        </form>
        <input id="filter-workouts" type="search" placeholder="Filter workouts" />
        <div id="workout-items" class="items"></div>
      </div>
    </section>

    <section class="toolbar">
      <form id="limit-form">
        <input id="limit" type="number" min="1" placeholder="Daily limit" value="{{LIMIT}}" />
        <button class="secondary" type="submit">Set limit</button>
      </form>
      <button id="reset" class="danger" type="button">Reset day</button>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const limitInput = document.getElementById('limit');
    const fields = {
      date: document.getElementById('date'),
      limit: document.getElementById('calories-limit'),
      total: document.getElementById('calories-total'),
      consumed: document.getElementById('calories-consumed'),
      burned: document.getElementById('calories-burned'),
      remaining: document.getElementById('calories-remaining'),
      remainingCard: document.getElementById('remaining-card'),
      progress: document.getElementById('calorie-progress')
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flash = (message) => {
      setStatus(message, 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const request = async (url, options = {}) => {
      const res = await fetch(url, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const updateSummary = (data) => {
      fields.date.textContent = data.date;
      fields.limit.textContent = data.calorie_limit;
      fields.total.textContent = data.total_calories;
      fields.consumed.textContent = data.consumed;
      fields.burned.textContent = data.burned;
      fields.remaining.textContent = data.remaining;
      fields.remainingCard.classList.toggle('over', data.over_limit);
      fields.progress.classList.toggle('over', data.over_limit);
      fields.progress.style.width = `${data.progress_percent}%`;
    };

    const renderItems = (type, items) => {
      const listEl = document.getElementById(`${type}-items`);
      listEl.innerHTML = '';
      items.forEach((item) => {
        const row = document.createElement('div');
        row.className = `item ${type}`;
        row.dataset.id = item.id;

        const name = document.createElement('span');
        name.className = 'name';
        name.textContent = item.name;

        const calories = document.createElement('span');
        calories.className = 'calories';
        calories.textContent = item.calories;

        const remove = document.createElement('button');
        remove.type = 'button';
        remove.className = 'delete';
        remove.textContent = 'x';

        row.append(name, calories, remove);
        listEl.appendChild(row);
      });
    };

    const loadItems = async (type) => {
      const query = document.getElementById(`filter-${type}s`).value;
      const data = await request(`/api/${type}s?q=${encodeURIComponent(query)}`);
      renderItems(type, data.items);
    };

    const refresh = async () => {
      const [summary] = await Promise.all([
        request('/api/summary'),
        loadItems('meal'),
        loadItems('workout')
      ]);
      updateSummary(summary);
    };

    const submitItem = async (type) => {
      const nameEl = document.getElementById(`${type}-name`);
      const caloriesEl = document.getElementById(`${type}-calories`);
      if (nameEl.value.trim() === '' || caloriesEl.value === '') {
        setStatus('Please fill in all fields', 'error');
        return;
      }
      await request(`/api/${type}s`, {
        method: 'POST',
        body: JSON.stringify({ name: nameEl.value, calories: Number(caloriesEl.value) })
      });
      nameEl.value = '';
      caloriesEl.value = '';
      await refresh();
      flash('Saved');
    };

    const removeItem = async (type, event) => {
      if (!event.target.classList.contains('delete')) {
        return;
      }
      if (!confirm('Are you sure?')) {
        return;
      }
      const id = event.target.closest('.item').dataset.id;
      updateSummary(await request(`/api/${type}s/${id}`, { method: 'DELETE' }));
      await loadItems(type);
    };

    ['meal', 'workout'].forEach((type) => {
      document.getElementById(`${type}-form`).addEventListener('submit', (event) => {
        event.preventDefault();
        submitItem(type).catch((err) => setStatus(err.message, 'error'));
      });
      document.getElementById(`${type}-items`).addEventListener('click', (event) => {
        removeItem(type, event).catch((err) => setStatus(err.message, 'error'));
      });
      document.getElementById(`filter-${type}s`).addEventListener('keyup', () => {
        loadItems(type).catch((err) => setStatus(err.message, 'error'));
      });
    });

    document.getElementById('limit-form').addEventListener('submit', (event) => {
      event.preventDefault();
      if (limitInput.value === '') {
        setStatus('Please add a limit', 'error');
        return;
      }
      request('/api/limit', {
        method: 'PUT',
        body: JSON.stringify({ limit: Number(limitInput.value) })
      })
        .then((data) => {
          updateSummary(data);
          flash('Limit saved');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('reset').addEventListener('click', () => {
      if (!confirm('Clear all meals and workouts?')) {
        return;
      }
      request('/api/reset', { method: 'POST' })
        .then((data) => {
          updateSummary(data);
          document.getElementById('filter-meals').value = '';
          document.getElementById('filter-workouts').value = '';
          renderItems('meal', []);
          renderItems('workout', []);
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
