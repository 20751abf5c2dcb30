use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyscope::corpus::Corpus;
use keyscope::geometry::{GeometryTable, Row};
use keyscope::layout::Layout;
use keyscope::scorer::{Metric, MetricReport, MetricValue, MetricViolation};
use std::cmp::Reverse;
use std::collections::HashMap;
use strum::IntoEnumIterator;

// Columns of the comparison table
const COMPARE_METRICS: [(Metric, &str); 12] = [
    (Metric::Effort, "Eff"),
    (Metric::Distance, "Dist"),
    (Metric::Sfb, "SFB"),
    (Metric::SkipBigram2u, "Skp2"),
    (Metric::TwoRowSfb, "2Row"),
    (Metric::PinkyScissors, "PScis"),
    (Metric::LateralStretch, "LSB"),
    (Metric::Alternation, "Alt"),
    (Metric::RollIn, "RIn"),
    (Metric::RollOut, "ROut"),
    (Metric::Redirect, "Redir"),
    (Metric::HandImbalance, "Imbal"),
];

fn fmt_value(v: MetricValue) -> String {
    match v {
        MetricValue::Defined(x) => format!("{:.2}", x),
        MetricValue::Undefined => "n/a".to_string(),
    }
}

fn unit(metric: Metric) -> &'static str {
    match metric {
        Metric::Distance => "mm",
        m if m.is_ratio() => "ratio",
        _ => "%",
    }
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_layout_grid(layout: &Layout, geometry: &GeometryTable) {
    println!("\nLayout: {}", layout.name());

    let by_pos: HashMap<(Row, u8), char> = layout
        .keys()
        .iter()
        .map(|(&c, s)| ((s.row, s.column), c))
        .collect();
    let max_col = geometry.slots.iter().map(|s| s.column).max().unwrap_or(0);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in Row::iter() {
        if !by_pos.keys().any(|(r, _)| *r == row) {
            continue;
        }
        let cells: Vec<Cell> = (0..=max_col)
            .map(|col| {
                let s = by_pos
                    .get(&(row, col))
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| " ".to_string());
                Cell::new(s).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_metric_report(report: &MetricReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
        Cell::new("Unit"),
    ]);
    right_align(&mut table, 1, 1);

    for metric in Metric::iter() {
        let value = report.get(metric);
        let mut cell = Cell::new(fmt_value(value));
        if !value.is_defined() {
            cell = cell.fg(Color::Yellow);
        }
        table.add_row(vec![
            Cell::new(metric.to_string()),
            cell,
            Cell::new(unit(metric)),
        ]);
    }
    println!("\n{}", table);

    let d = &report.diagnostics;
    println!(
        "Unmapped: {}% of chars, {}% of bigrams, {}% of trigrams",
        fmt_value(d.unmapped_pct),
        fmt_value(d.unmapped_bigram_pct),
        fmt_value(d.unmapped_trigram_pct)
    );
    if !d.unmapped_chars.is_empty() {
        println!(
            "Unmapped characters: {}",
            d.unmapped_chars.iter().collect::<String>()
        );
    }
}

pub fn print_usage_report(report: &MetricReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Finger").add_attribute(Attribute::Bold),
        Cell::new("%"),
        Cell::new("Row").add_attribute(Attribute::Bold),
        Cell::new("%"),
        Cell::new("Hand").add_attribute(Attribute::Bold),
        Cell::new("%"),
    ]);

    let fingers: Vec<_> = report.finger_usage.iter().collect();
    let rows: Vec<_> = report.row_usage.iter().collect();
    let hands: Vec<_> = report.hand_usage.iter().collect();

    for i in 0..fingers.len().max(rows.len()).max(hands.len()) {
        let pair = |item: Option<(String, MetricValue)>| match item {
            Some((k, v)) => (Cell::new(k), Cell::new(fmt_value(v))),
            None => (Cell::new(""), Cell::new("")),
        };
        let (f, fv) = pair(fingers.get(i).map(|(k, v)| (k.to_string(), **v)));
        let (r, rv) = pair(rows.get(i).map(|(k, v)| (k.to_string(), **v)));
        let (h, hv) = pair(hands.get(i).map(|(k, v)| (k.to_string(), **v)));
        table.add_row(vec![f, fv, r, rv, h, hv]);
    }
    right_align(&mut table, 1, 1);
    right_align(&mut table, 3, 3);
    right_align(&mut table, 5, 5);
    println!("\n{}", table);

    let columns = report
        .column_usage
        .iter()
        .map(|(c, v)| format!("{}:{}", c, fmt_value(*v)))
        .collect::<Vec<_>>()
        .join("  ");
    println!("Columns %: {}", columns);
}

fn offender_table(title: &str, list: &[MetricViolation]) -> Option<Table> {
    if list.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Freq %"),
        Cell::new("Score"),
    ]);
    for v in list {
        table.add_row(vec![
            Cell::new(&v.keys),
            Cell::new(format!("{:.3}", v.freq * 100.0)),
            Cell::new(format!("{:.3}", v.score)),
        ]);
    }
    right_align(&mut table, 1, 2);
    Some(table)
}

pub fn print_offenders(report: &MetricReport) {
    let d = &report.diagnostics;
    for (title, list) in [
        ("Top SFBs", &d.top_sfbs),
        ("Top Scissors", &d.top_scissors),
        ("Top Redirects", &d.top_redirs),
    ] {
        if let Some(table) = offender_table(title, list) {
            println!("\n{}", table);
        }
    }
}

pub fn print_comparison_report(results: &[MetricReport], sorted_by: Metric) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Layout").add_attribute(Attribute::Bold)];
    for (metric, label) in COMPARE_METRICS {
        let mut cell = Cell::new(label);
        if metric == sorted_by {
            cell = cell.fg(Color::Cyan).add_attribute(Attribute::Bold);
        }
        header.push(cell);
    }
    table.add_row(header);
    right_align(&mut table, 1, COMPARE_METRICS.len());

    for report in results {
        let mut row = vec![Cell::new(&report.layout_name).add_attribute(Attribute::Bold)];
        for (metric, _) in COMPARE_METRICS {
            row.push(Cell::new(fmt_value(report.get(metric))));
        }
        table.add_row(row);
    }
    println!("\nSorted by {} (ascending)", sorted_by);
    println!("{}", table);
}

pub fn print_corpus_summary(corpus: &Corpus, top: usize) {
    println!("\nCorpus version: {}", corpus.version());
    println!(
        "Totals: {} chars, {} bigrams, {} trigrams",
        corpus.total_chars(),
        corpus.total_bigrams(),
        corpus.total_trigrams()
    );

    let counts = corpus.counts();
    let mut chars: Vec<_> = counts.chars.iter().collect();
    chars.sort_by_key(|&(c, n)| (Reverse(*n), *c));
    let mut bigrams: Vec<_> = counts.bigrams.iter().collect();
    bigrams.sort_by_key(|&(b, n)| (Reverse(*n), *b));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Char").add_attribute(Attribute::Bold),
        Cell::new("%"),
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("%"),
    ]);
    for i in 0..top {
        let (c, cv) = match chars.get(i) {
            Some((c, _)) => (c.to_string(), format!("{:.3}", corpus.char_freq(**c) * 100.0)),
            None => (String::new(), String::new()),
        };
        let (b, bv) = match bigrams.get(i) {
            Some(((a, b), _)) => (
                format!("{}{}", a, b),
                format!("{:.3}", corpus.bigram_freq(*a, *b) * 100.0),
            ),
            None => (String::new(), String::new()),
        };
        if c.is_empty() && b.is_empty() {
            break;
        }
        table.add_row(vec![c, cv, b, bv]);
    }
    right_align(&mut table, 1, 1);
    right_align(&mut table, 3, 3);
    println!("\n{}", table);

    let flags = corpus.consistency_flags();
    if !flags.is_empty() {
        println!(
            "\n⚠️  {} consistency flag(s); largest deviations:",
            flags.len()
        );
        for flag in flags.iter().take(top.min(10)) {
            println!(
                "   {:<12} '{}' {:.4} vs {:.4} ({:+.0}%)",
                flag.source,
                flag.ngram,
                flag.source_freq,
                flag.merged_freq,
                (flag.source_freq - flag.merged_freq) / flag.merged_freq * 100.0
            );
        }
    }
}
