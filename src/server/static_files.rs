//! Embedded dashboard assets. Served from memory; no files on disk.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>SkyCast Analytics</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <header>
    <h1>&#127780;&#65039; SkyCast Analytics</h1>
    <p class="subtitle">Historical Temperature Comparison Dashboard</p>
  </header>

  <section id="controls">
    <label>City A
      <input id="city-a" type="text" value="New York" autocomplete="off">
    </label>
    <label>City B
      <input id="city-b" type="text" value="London" autocomplete="off">
    </label>
    <label>Start
      <input id="start" type="date">
    </label>
    <label>End
      <input id="end" type="date">
    </label>
    <button id="go">Compare</button>
  </section>

  <p id="status" hidden></p>

  <section id="results" hidden>
    <div id="metrics">
      <div class="metric"><span class="metric-label" id="label-a"></span><span class="metric-value" id="mean-a"></span></div>
      <div class="metric"><span class="metric-label" id="label-b"></span><span class="metric-value" id="mean-b"></span></div>
    </div>

    <nav id="tabs">
      <button class="tab active" data-view="chart">&#128200; Chart</button>
      <button class="tab" data-view="table">&#128203; Table</button>
    </nav>

    <div id="view-chart">
      <svg id="chart" viewBox="0 0 720 320" preserveAspectRatio="none"></svg>
      <div id="legend"></div>
    </div>
    <div id="view-table" hidden>
      <table id="pivot"></table>
    </div>
  </section>

  <script src="/app.js"></script>
</body>
</html>
"##;

pub const STYLE_CSS: &str = r##"* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: "Segoe UI", system-ui, sans-serif;
  background: #0f1524;
  color: #e8ecf4;
}
header { padding: 1.2rem 2rem 0.4rem; }
header h1 { margin: 0; font-size: 1.6rem; }
.subtitle { margin: 0.2rem 0 0; color: #8a94ab; }

#controls {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  align-items: flex-end;
  padding: 1rem 2rem;
}
#controls label { display: flex; flex-direction: column; font-size: 0.8rem; color: #8a94ab; gap: 0.25rem; }
#controls input {
  background: #1a2236;
  border: 1px solid #2d3850;
  border-radius: 6px;
  color: #e8ecf4;
  padding: 0.45rem 0.6rem;
  font-size: 0.95rem;
}
#go {
  background: #3573e8;
  border: none;
  border-radius: 6px;
  color: white;
  padding: 0.55rem 1.4rem;
  font-size: 0.95rem;
  cursor: pointer;
}
#go:hover { background: #2a5fc4; }

#status { padding: 0 2rem; color: #f2b03d; }
#status.error { color: #e85f5f; }

#results { padding: 0 2rem 2rem; }
#metrics { display: flex; gap: 1rem; margin-bottom: 1rem; }
.metric {
  background: #1a2236;
  border: 1px solid #2d3850;
  border-radius: 8px;
  padding: 0.8rem 1.2rem;
  display: flex;
  flex-direction: column;
  min-width: 220px;
}
.metric-label { font-size: 0.8rem; color: #8a94ab; }
.metric-value { font-size: 1.5rem; font-weight: 600; }

#tabs { margin-bottom: 0.6rem; }
.tab {
  background: none;
  border: none;
  border-bottom: 2px solid transparent;
  color: #8a94ab;
  padding: 0.4rem 0.8rem;
  cursor: pointer;
  font-size: 0.95rem;
}
.tab.active { color: #e8ecf4; border-bottom-color: #3573e8; }

#chart { width: 100%; height: 320px; background: #1a2236; border-radius: 8px; }
#legend { display: flex; gap: 1.5rem; padding: 0.5rem 0.2rem; font-size: 0.85rem; }
.legend-swatch { display: inline-block; width: 12px; height: 12px; border-radius: 50%; margin-right: 0.4rem; vertical-align: -1px; }

#pivot { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
#pivot th, #pivot td { border: 1px solid #2d3850; padding: 0.35rem 0.7rem; text-align: right; }
#pivot th:first-child, #pivot td:first-child { text-align: left; }
#pivot th { background: #1a2236; }
#pivot td.missing { color: #4a5468; }
"##;

pub const APP_JS: &str = r##"const COLORS = ["#3573e8", "#e8734a"];

function byId(id) { return document.getElementById(id); }

function isoDaysAgo(days) {
  const d = new Date();
  d.setDate(d.getDate() - days);
  return d.toISOString().slice(0, 10);
}

function initDates() {
  const today = isoDaysAgo(0);
  for (const id of ["start", "end"]) {
    byId(id).max = today; // the picker never exceeds the current date
  }
  byId("start").value = isoDaysAgo(30);
  byId("end").value = today;
}

function setStatus(message, isError) {
  const el = byId("status");
  el.hidden = !message;
  el.textContent = message || "";
  el.className = isError ? "error" : "";
}

function drawChart(cities) {
  const svg = byId("chart");
  const W = 720, H = 320, PAD = 36;
  svg.innerHTML = "";

  const all = cities.flatMap(c => c.series.map(r => r.max_temp));
  let min = Math.min(...all), max = Math.max(...all);
  if (max === min) { min -= 1; max += 1; }

  const dates = [...new Set(cities.flatMap(c => c.series.map(r => r.date)))].sort();
  const x = d => PAD + (dates.indexOf(d) / Math.max(dates.length - 1, 1)) * (W - 2 * PAD);
  const y = v => H - PAD - ((v - min) / (max - min)) * (H - 2 * PAD);

  // Horizontal gridlines with value labels
  for (let i = 0; i <= 4; i++) {
    const v = min + (i / 4) * (max - min);
    const gy = y(v);
    svg.insertAdjacentHTML("beforeend",
      `<line x1="${PAD}" y1="${gy}" x2="${W - PAD}" y2="${gy}" stroke="#2d3850" stroke-width="1"/>` +
      `<text x="4" y="${gy + 4}" fill="#8a94ab" font-size="11">${v.toFixed(1)}</text>`);
  }

  cities.forEach((city, i) => {
    const pts = city.series.map(r => `${x(r.date)},${y(r.max_temp)}`).join(" ");
    svg.insertAdjacentHTML("beforeend",
      `<polyline points="${pts}" fill="none" stroke="${COLORS[i]}" stroke-width="2"/>`);
    for (const r of city.series) {
      svg.insertAdjacentHTML("beforeend",
        `<circle cx="${x(r.date)}" cy="${y(r.max_temp)}" r="3.5" fill="${COLORS[i]}">` +
        `<title>${city.label} — ${r.date}: ${r.max_temp.toFixed(1)} °C</title></circle>`);
    }
  });

  // x-axis endpoints
  if (dates.length > 0) {
    svg.insertAdjacentHTML("beforeend",
      `<text x="${PAD}" y="${H - 8}" fill="#8a94ab" font-size="11">${dates[0]}</text>` +
      `<text x="${W - PAD}" y="${H - 8}" fill="#8a94ab" font-size="11" text-anchor="end">${dates[dates.length - 1]}</text>`);
  }

  byId("legend").innerHTML = cities.map((c, i) =>
    `<span><span class="legend-swatch" style="background:${COLORS[i]}"></span>${c.label}</span>`
  ).join("");
}

function fillTable(table) {
  const el = byId("pivot");
  const head = `<tr><th>Date</th>${table.columns.map(c => `<th>${c}</th>`).join("")}</tr>`;
  const body = table.rows.map(row =>
    `<tr><td>${row.date}</td>${row.values.map(v =>
      v === null ? `<td class="missing">–</td>` : `<td>${v.toFixed(1)}</td>`
    ).join("")}</tr>`
  ).join("");
  el.innerHTML = head + body;
}

async function runCompare() {
  const cityA = byId("city-a").value.trim();
  const cityB = byId("city-b").value.trim();
  const start = byId("start").value;
  const end = byId("end").value;

  if (!cityA || !cityB) {
    setStatus("Enter both city names.", false);
    return;
  }
  if (!start || !end) {
    setStatus("Pick a start and end date.", false);
    return;
  }

  setStatus("Fetching data…", false);
  byId("results").hidden = true;

  const params = new URLSearchParams({ city_a: cityA, city_b: cityB, start, end });
  let resp;
  try {
    resp = await fetch(`/api/compare?${params}`);
  } catch (e) {
    setStatus(`Network error: ${e.message}`, true);
    return;
  }

  if (!resp.ok) {
    let message = `Request failed (HTTP ${resp.status})`;
    try { message = (await resp.json()).error || message; } catch (_) {}
    setStatus(message, true);
    return;
  }

  const data = await resp.json();
  setStatus("", false);

  const [a, b] = data.cities;
  byId("label-a").textContent = `Avg Max Temp: ${a.label}`;
  byId("mean-a").textContent = `${a.mean_max_temp.toFixed(1)} °C`;
  byId("label-b").textContent = `Avg Max Temp: ${b.label}`;
  byId("mean-b").textContent = `${b.mean_max_temp.toFixed(1)} °C`;

  drawChart(data.cities);
  fillTable(data.table);
  byId("results").hidden = false;
}

function initTabs() {
  for (const tab of document.querySelectorAll(".tab")) {
    tab.addEventListener("click", () => {
      document.querySelectorAll(".tab").forEach(t => t.classList.remove("active"));
      tab.classList.add("active");
      byId("view-chart").hidden = tab.dataset.view !== "chart";
      byId("view-table").hidden = tab.dataset.view !== "table";
    });
  }
}

initDates();
initTabs();
byId("go").addEventListener("click", runCompare);
for (const id of ["city-a", "city-b"]) {
  byId(id).addEventListener("keydown", e => { if (e.key === "Enter") runCompare(); });
}
"##;
