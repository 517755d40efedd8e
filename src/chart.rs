use std::f64::consts::TAU;
use std::path::Path as FilePath;

use svg::{
    Document,
    node::{
        Text as TextNode,
        element::{Circle, Path, Rectangle, Text},
    },
};

use crate::ledger::{CategoryTotal, format_amount};

const COLORS: &[&str] = &["#9b5cf6", "#f97316", "#22c55e", "#3b82f6", "#eab308"];
const BORDER_COLOR: &str = "#111827";
const BORDER_WIDTH: f64 = 2.0;
const LABEL_COLOR: &str = "#e6eef8";

const WIDTH: f64 = 400.0;
const RADIUS: f64 = 150.0;
const CENTER: (f64, f64) = (WIDTH / 2.0, RADIUS + 20.0);
const LEGEND_TOP: f64 = CENTER.1 + RADIUS + 30.0;
const LEGEND_ROW: f64 = 22.0;

/// Category distribution as a pie, legend underneath.
pub struct PieChart<'d> {
    data: &'d [CategoryTotal],
}

impl<'d> PieChart<'d> {
    pub fn new(data: &'d [CategoryTotal]) -> Self {
        Self { data }
    }

    pub fn to_document(&self) -> Document {
        let rows = self.data.len().max(1) as f64;
        let height = LEGEND_TOP + rows * LEGEND_ROW + 10.0;

        let background = Rectangle::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("width", WIDTH)
            .set("height", height)
            .set("fill", BORDER_COLOR);

        let document = Document::new()
            .set("viewBox", (0.0, 0.0, WIDTH, height))
            .set("width", WIDTH)
            .set("height", height)
            .add(background);

        let document = self.add_slices(document);

        if self.data.is_empty() {
            return document.add(label(WIDTH / 2.0 - 40.0, LEGEND_TOP, "No expenses"));
        }

        self.data
            .iter()
            .enumerate()
            .fold(document, |doc, (i, entry)| {
                let y = LEGEND_TOP + i as f64 * LEGEND_ROW;
                let swatch = Rectangle::new()
                    .set("x", 20.0)
                    .set("y", y - 12.0)
                    .set("width", 14.0)
                    .set("height", 14.0)
                    .set("fill", color(i));
                let text = format!(
                    "{} {} ({:.1}%)",
                    entry.category,
                    format_amount(entry.amount),
                    entry.share() * 100.0
                );
                doc.add(swatch).add(label(42.0, y, &text))
            })
    }

    pub fn save(&self, file: impl AsRef<FilePath>) -> std::io::Result<()> {
        svg::save(file, &self.to_document())
    }

    fn add_slices(&self, document: Document) -> Document {
        let visible: Vec<(usize, f64)> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, entry.share()))
            .filter(|(_, share)| *share > 0.0)
            .collect();

        // A lone slice has coinciding arc endpoints, which SVG draws as nothing.
        if let [(i, _)] = visible.as_slice() {
            let circle = Circle::new()
                .set("cx", CENTER.0)
                .set("cy", CENTER.1)
                .set("r", RADIUS)
                .set("fill", color(*i))
                .set("stroke", BORDER_COLOR)
                .set("stroke-width", BORDER_WIDTH);
            return document.add(circle);
        }

        let mut start = 0.0;
        visible.into_iter().fold(document, |doc, (i, share)| {
            let end = start + share * TAU;
            let path = Path::new()
                .set("d", slice_path(start, end))
                .set("fill", color(i))
                .set("stroke", BORDER_COLOR)
                .set("stroke-width", BORDER_WIDTH);
            start = end;
            doc.add(path)
        })
    }
}

fn color(i: usize) -> &'static str {
    COLORS[i % COLORS.len()]
}

fn label(x: f64, y: f64, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("fill", LABEL_COLOR)
        .set("font-family", "sans-serif")
        .set("font-size", 14)
        .add(TextNode::new(content))
}

/// Point on the rim, angles measured clockwise from 12 o'clock.
fn rim(angle: f64) -> (f64, f64) {
    (
        CENTER.0 + RADIUS * angle.sin(),
        CENTER.1 - RADIUS * angle.cos(),
    )
}

fn slice_path(start: f64, end: f64) -> String {
    let (x0, y0) = rim(start);
    let (x1, y1) = rim(end);
    let large_arc = if end - start > TAU / 2.0 { 1 } else { 0 };
    format!(
        "M {:.3} {:.3} L {:.3} {:.3} A {r:.3} {r:.3} 0 {} 1 {:.3} {:.3} Z",
        CENTER.0,
        CENTER.1,
        x0,
        y0,
        large_arc,
        x1,
        y1,
        r = RADIUS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::category_totals;
    use crate::models::{Expense, ExpenseRecord, LocalRecord};

    fn totals(entries: &[(f64, &str)]) -> Vec<CategoryTotal> {
        let records: Vec<ExpenseRecord> = entries
            .iter()
            .enumerate()
            .map(|(i, (amount, category))| {
                ExpenseRecord::Local(LocalRecord {
                    id: i.to_string(),
                    expense: Expense {
                        amount: *amount,
                        category: category.to_string(),
                        description: "—".to_string(),
                        date: "2024-01-01".to_string(),
                    },
                })
            })
            .collect();
        category_totals(&records)
    }

    #[test]
    fn one_path_per_category() {
        let data = totals(&[(10.0, "Food"), (30.0, "Rent"), (5.0, "Food"), (5.0, "Fun")]);
        let svg = PieChart::new(&data).to_document().to_string();
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("#9b5cf6"));
        assert!(svg.contains("Rent 30.00 (60.0%)"));
    }

    #[test]
    fn single_category_is_a_full_circle() {
        let data = totals(&[(50.0, "Food")]);
        let svg = PieChart::new(&data).to_document().to_string();
        assert_eq!(svg.matches("<circle").count(), 1);
        assert_eq!(svg.matches("<path").count(), 0);
    }

    #[test]
    fn empty_collection_has_placeholder_legend() {
        let svg = PieChart::new(&[]).to_document().to_string();
        assert!(svg.contains("No expenses"));
        assert_eq!(svg.matches("<path").count(), 0);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(color(0), color(COLORS.len()));
        assert_ne!(color(0), color(1));
    }

    #[test]
    fn half_slice_uses_small_arc() {
        let path = slice_path(0.0, TAU / 2.0);
        assert!(path.contains(" 0 0 1 "));
        let path = slice_path(0.0, TAU * 0.75);
        assert!(path.contains(" 0 1 1 "));
    }
}
