// Report rendering.
//
// Plain output is the two answers, one per line, safe-removal count first.
// `--top N` appends a ranked list of the most dangerous blocks, and `--json`
// replaces everything with the serialized `StabilityReport`. `--timings`
// sends a per-phase breakdown to stderr.

use brickfall_sim::StabilityReport;

/// The two answers, one per line.
pub fn render_answers(report: &StabilityReport) -> String {
    let (safe, cascade) = report.answers();
    format!("{safe}\n{cascade}\n")
}

/// Ranked list of the `n` critical blocks with the largest cascades.
pub fn render_top(report: &StabilityReport, n: usize) -> String {
    let mut out = String::new();
    let ranked = report.most_dangerous(n);
    if ranked.is_empty() {
        out.push_str("no critical blocks\n");
        return out;
    }
    let width = ranked
        .iter()
        .map(|c| c.block.to_string().len())
        .max()
        .unwrap_or(0);
    for c in ranked {
        let phrase = if c.falls == 1 { "block falls" } else { "blocks fall" };
        let id = c.block.to_string();
        out.push_str(&format!("{id:<width$}  {} {phrase}\n", c.falls));
    }
    out
}

/// Wall-clock time of each pipeline phase, one per line, then the total.
pub fn render_timings(report: &StabilityReport) -> String {
    let t = &report.timings;
    [
        ("settle", t.settle),
        ("support graph", t.support_graph),
        ("cascades", t.cascades),
        ("total", t.total()),
    ]
    .iter()
    .map(|(phase, elapsed)| format!("{phase:<13}  {elapsed:?}\n"))
    .collect()
}

pub fn render_json(report: &StabilityReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
