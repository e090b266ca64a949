use super::write_node;
use crate::Result;
use crate::compare::ComparisonSession;
use crate::visual::Node;
use crate::visual::safe::escape;
use chrono::{DateTime, Local};
use compact_str::CompactString;
use core::fmt::Write;

/// Write a self-contained HTML page holding a record legend and one section per attribute.
pub fn generate<W: Write>(
    session: &ComparisonSession<'_>,
    sections: &[(CompactString, Node)],
    timestamp: DateTime<Local>,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "  <meta charset=\"UTF-8\">")?;
    writeln!(writer, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
    writeln!(writer, "  <title>Record Comparison</title>")?;
    write_styles(writer)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;

    write_header(writer, session.records().len(), timestamp)?;
    write_legend(writer, session)?;

    writeln!(writer, "  <main class=\"sections\">")?;
    if sections.is_empty() {
        writeln!(writer, "    <p class=\"no-sections\">No attribute has a value in any record.</p>")?;
    }
    for (_, node) in sections {
        write!(writer, "    ")?;
        write_node(node, writer)?;
        writeln!(writer)?;
    }
    writeln!(writer, "  </main>")?;

    write_scripts(writer)?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

#[expect(clippy::too_many_lines, reason = "Stylesheet is one long list of rules")]
fn write_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "  <style>")?;
    writeln!(writer, "    :root {{")?;
    writeln!(writer, "      --bg-color: #f0f2f5;")?;
    writeln!(writer, "      --card-bg: #ffffff;")?;
    writeln!(writer, "      --text-color: #1a202c;")?;
    writeln!(writer, "      --text-secondary: #64748b;")?;
    writeln!(writer, "      --border-color: #e2e8f0;")?;
    writeln!(writer, "      --track-bg: #e2e8f0;")?;
    writeln!(writer, "      --accent-color: #3b82f6;")?;
    writeln!(writer, "      --shadow: 0 1px 3px rgba(0,0,0,0.08), 0 4px 16px rgba(0,0,0,0.04);")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    @media (prefers-color-scheme: dark) {{")?;
    writeln!(writer, "      :root {{")?;
    writeln!(writer, "        --bg-color: #0f172a;")?;
    writeln!(writer, "        --card-bg: #1e293b;")?;
    writeln!(writer, "        --text-color: #e2e8f0;")?;
    writeln!(writer, "        --text-secondary: #94a3b8;")?;
    writeln!(writer, "        --border-color: #334155;")?;
    writeln!(writer, "        --track-bg: #334155;")?;
    writeln!(writer, "        --accent-color: #60a5fa;")?;
    writeln!(writer, "        --shadow: 0 1px 3px rgba(0,0,0,0.3), 0 4px 16px rgba(0,0,0,0.2);")?;
    writeln!(writer, "      }}")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    body.dark-theme {{")?;
    writeln!(writer, "      --bg-color: #0f172a; --card-bg: #1e293b; --text-color: #e2e8f0; --text-secondary: #94a3b8;")?;
    writeln!(writer, "      --border-color: #334155; --track-bg: #334155; --accent-color: #60a5fa;")?;
    writeln!(writer, "      --shadow: 0 1px 3px rgba(0,0,0,0.3), 0 4px 16px rgba(0,0,0,0.2);")?;
    writeln!(writer, "      color-scheme: dark;")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    body.light-theme {{")?;
    writeln!(writer, "      --bg-color: #f0f2f5; --card-bg: #ffffff; --text-color: #1a202c; --text-secondary: #64748b;")?;
    writeln!(writer, "      --border-color: #e2e8f0; --track-bg: #e2e8f0; --accent-color: #3b82f6;")?;
    writeln!(writer, "      --shadow: 0 1px 3px rgba(0,0,0,0.08), 0 4px 16px rgba(0,0,0,0.04);")?;
    writeln!(writer, "      color-scheme: light;")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    body {{")?;
    writeln!(writer, "      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;")?;
    writeln!(writer, "      background: var(--bg-color); color: var(--text-color);")?;
    writeln!(writer, "      max-width: 1100px; margin: 0 auto; padding: 24px;")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    .header {{ display: flex; align-items: center; justify-content: space-between; margin-bottom: 16px; }}")?;
    writeln!(writer, "    .header h1 {{ margin: 0; font-size: 1.6em; }}")?;
    writeln!(writer, "    .subtitle {{ margin: 4px 0 0; color: var(--text-secondary); }}")?;
    writeln!(writer, "    .theme-toggle {{ background: none; border: 1px solid var(--border-color); border-radius: 8px; padding: 6px; cursor: pointer; }}")?;
    writeln!(writer, "    .theme-toggle svg {{ width: 20px; height: 20px; fill: var(--text-color); }}")?;
    writeln!(writer, "    .legend {{ display: flex; flex-wrap: wrap; gap: 12px; list-style: none; padding: 0; margin: 0 0 20px; }}")?;
    writeln!(writer, "    .legend-entry {{ display: flex; align-items: center; gap: 6px; }}")?;
    writeln!(writer, "    .legend-swatch {{ width: 14px; height: 14px; border-radius: 3px; background: var(--record-color); }}")?;
    writeln!(writer, "    .morph-compare {{ background: var(--card-bg); border-radius: 10px; box-shadow: var(--shadow); padding: 16px 20px; margin-bottom: 16px; }}")?;
    writeln!(writer, "    .morph-compare-title {{ margin: 0 0 12px; font-size: 1.05em; }}")?;
    writeln!(writer, "    .compare-row {{ display: grid; grid-template-columns: 180px 1fr; gap: 12px; align-items: center; padding: 6px 0; border-top: 1px solid var(--border-color); }}")?;
    writeln!(writer, "    .compare-name {{ border-left: 4px solid var(--record-color); padding-left: 8px; font-weight: 600; }}")?;
    writeln!(writer, "    .compare-bar, .progress, .range-track {{ position: relative; height: 10px; background: var(--track-bg); border-radius: 5px; }}")?;
    writeln!(writer, "    .compare-bar-fill, .progress-fill {{ height: 100%; border-radius: 5px; background: var(--record-color, var(--accent-color)); }}")?;
    writeln!(writer, "    .range-band {{ position: absolute; height: 100%; border-radius: 5px; background: var(--record-tint, var(--accent-color)); }}")?;
    writeln!(writer, "    .stats-avg {{ position: absolute; top: -3px; width: 2px; height: 16px; background: var(--record-color, var(--text-color)); }}")?;
    writeln!(writer, "    .rating {{ display: inline-flex; gap: 3px; align-items: center; }}")?;
    writeln!(writer, "    .rating-level {{ width: 14px; height: 14px; border-radius: 50%;")?;
    writeln!(writer, "      background: linear-gradient(90deg, var(--record-color, #f59e0b) var(--fill), var(--track-bg) var(--fill)); }}")?;
    writeln!(writer, "    .rating-value, .progress-label, .range-label {{ margin-left: 8px; color: var(--text-secondary); font-size: 0.9em; }}")?;
    writeln!(writer, "    .badge {{ display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 0.85em; font-weight: 600; }}")?;
    writeln!(writer, "    .badge-info {{ background: #dbeafe; color: #1e40af; }}")?;
    writeln!(writer, "    .badge-success {{ background: #dcfce7; color: #166534; }}")?;
    writeln!(writer, "    .badge-warning {{ background: #fef3c7; color: #92400e; }}")?;
    writeln!(writer, "    .badge-danger {{ background: #fee2e2; color: #991b1b; }}")?;
    writeln!(writer, "    .tags {{ display: flex; flex-wrap: wrap; gap: 4px; }}")?;
    writeln!(writer, "    .tag {{ background: var(--track-bg); border-radius: 4px; padding: 1px 8px; font-size: 0.85em; }}")?;
    writeln!(writer, "    .bool.yes {{ color: #16a34a; }}")?;
    writeln!(writer, "    .bool.no {{ color: #dc2626; }}")?;
    writeln!(writer, "    .image {{ max-width: 160px; max-height: 120px; border-radius: 6px; }}")?;
    writeln!(writer, "    .timeline, .steps {{ margin: 0; padding-left: 20px; }}")?;
    writeln!(writer, "    .timeline-date {{ font-weight: 600; margin-right: 8px; }}")?;
    writeln!(writer, "    .step-number {{ display: none; }}")?;
    writeln!(writer, "    .pie {{ display: flex; gap: 16px; align-items: center; }}")?;
    writeln!(writer, "    .pie-chart {{ width: 96px; height: 96px; border-radius: 50%; }}")?;
    writeln!(writer, "    .pie-legend, .radar-legend {{ list-style: none; padding: 0; margin: 0; font-size: 0.85em; }}")?;
    writeln!(writer, "    .pie-swatch {{ display: inline-block; width: 10px; height: 10px; margin-right: 6px; background: var(--swatch); }}")?;
    writeln!(writer, "    .radar {{ display: flex; gap: 16px; align-items: center; }}")?;
    writeln!(writer, "    .radar-plot {{ width: 160px; height: 160px; }}")?;
    writeln!(writer, "    .radar-grid {{ fill: none; stroke: var(--border-color); }}")?;
    writeln!(writer, "    .radar-shape {{ fill: var(--record-tint, var(--accent-color)); fill-opacity: 0.5; stroke: var(--record-color, var(--accent-color)); }}")?;
    writeln!(writer, "    .geo-coords {{ font-family: monospace; margin: 0 8px; }}")?;
    writeln!(writer, "    .morph-empty {{ color: var(--text-secondary); }}")?;
    writeln!(writer, "    .morph-fallback {{ color: var(--text-secondary); font-style: italic; border-left: 3px solid #dc2626; padding-left: 6px; }}")?;
    writeln!(writer, "    .object {{ display: grid; grid-template-columns: auto 1fr; gap: 2px 12px; margin: 0; }}")?;
    writeln!(writer, "    .object dt {{ color: var(--text-secondary); }}")?;
    writeln!(writer, "    .object dd {{ margin: 0; }}")?;
    writeln!(writer, "    a {{ color: var(--accent-color); }}")?;
    writeln!(writer, "  </style>")?;
    Ok(())
}

fn write_header<W: Write>(writer: &mut W, record_count: usize, timestamp: DateTime<Local>) -> Result<()> {
    let date = timestamp.format("%Y-%m-%d").to_string();
    writeln!(writer, "  <div class=\"header\">")?;
    writeln!(writer, "    <div class=\"header-content\">")?;
    writeln!(writer, "      <h1>Comparison of {record_count} records</h1>")?;
    writeln!(
        writer,
        "      <p class=\"subtitle\">Produced by morphs {} on {}</p>",
        env!("CARGO_PKG_VERSION"),
        date
    )?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "    <button class=\"theme-toggle\" onclick=\"toggleTheme()\" aria-label=\"Toggle theme\">")?;
    writeln!(writer, "      <svg id=\"theme-icon\" viewBox=\"0 0 24 24\"><path d=\"M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z\"/></svg>")?;
    writeln!(writer, "    </button>")?;
    writeln!(writer, "  </div>")?;
    Ok(())
}

fn write_legend<W: Write>(writer: &mut W, session: &ComparisonSession<'_>) -> Result<()> {
    writeln!(writer, "  <ul class=\"legend\">")?;
    for (record, token) in session.records().iter().zip(session.colors()) {
        writeln!(
            writer,
            "    <li class=\"legend-entry\" data-record=\"{}\" style=\"--record-color: {}; --record-tint: {}\"><span class=\"legend-swatch\"></span>{}</li>",
            escape(&record.id),
            token.base.hex(),
            token.tint.hex(),
            escape(&record.name)
        )?;
    }
    writeln!(writer, "  </ul>")?;
    Ok(())
}

fn write_scripts<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "  <script>")?;
    writeln!(writer, "    function getSystemTheme() {{")?;
    writeln!(writer, "      return window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    function applyTheme(theme) {{")?;
    writeln!(writer, "      document.body.classList.remove('dark-theme', 'light-theme');")?;
    writeln!(writer, "      document.body.classList.add(theme + '-theme');")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    function toggleTheme() {{")?;
    writeln!(writer, "      const currentTheme = localStorage.getItem('theme') || getSystemTheme();")?;
    writeln!(writer, "      const newTheme = currentTheme === 'dark' ? 'light' : 'dark';")?;
    writeln!(writer, "      localStorage.setItem('theme', newTheme);")?;
    writeln!(writer, "      applyTheme(newTheme);")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    applyTheme(localStorage.getItem('theme') || getSystemTheme());")?;
    writeln!(writer, "  </script>")?;
    Ok(())
}
