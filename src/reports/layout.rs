use crate::plans::model::{Meal, Plan};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const fn title() -> Self {
        Self {
            size: 18.0,
            bold: true,
            italic: false,
        }
    }
    pub const fn heading() -> Self {
        Self {
            size: 12.0,
            bold: true,
            italic: false,
        }
    }
    pub const fn body() -> Self {
        Self {
            size: 10.0,
            bold: false,
            italic: false,
        }
    }
    pub const fn placeholder() -> Self {
        Self {
            size: 10.0,
            bold: false,
            italic: true,
        }
    }
}

/// Drawing surface the layout engine runs against. Coordinates are points
/// measured from the top-left of the page; implementations convert to their
/// native space.
pub trait Canvas {
    fn page_height(&self) -> f64;
    fn start_page(&mut self);
    /// Wrapped-text height of `text` at `width`, in points.
    fn measure_height(&self, text: &str, width: f64, style: TextStyle) -> f64;
    /// Draw `text` word-wrapped at `width`, top edge at `y`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, width: f64, style: TextStyle);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, gray: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

const MARGIN: f64 = 50.0;

const COL_MEAL_W: f64 = 110.0;
const COL_DESC_W: f64 = 220.0;
const COL_CAL_W: f64 = 60.0;
const COL_PROT_W: f64 = 60.0;
const TABLE_W: f64 = COL_MEAL_W + COL_DESC_W + COL_CAL_W + COL_PROT_W;

const CELL_INSET: f64 = 4.0;
const MIN_ROW_H: f64 = 24.0;
const ROW_PADDING: f64 = 8.0;
const HEADER_ROW_H: f64 = 22.0;
const DAY_LABEL_H: f64 = 20.0;
const DAY_GAP: f64 = 14.0;

pub struct ReportLayout<'c, C: Canvas> {
    canvas: &'c mut C,
    cursor: f64,
}

impl<'c, C: Canvas> ReportLayout<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        Self {
            canvas,
            cursor: MARGIN,
        }
    }

    fn bottom(&self) -> f64 {
        self.canvas.page_height() - MARGIN
    }

    fn break_page(&mut self) {
        self.canvas.start_page();
        self.cursor = MARGIN;
    }

    fn ensure_fits(&mut self, height: f64) {
        if self.cursor + height > self.bottom() {
            self.break_page();
        }
    }

    fn draw_table_header(&mut self) {
        let y = self.cursor;
        self.canvas.fill_rect(MARGIN, y, TABLE_W, HEADER_ROW_H, 0.9);
        self.canvas.stroke_rect(MARGIN, y, TABLE_W, HEADER_ROW_H);
        let labels = [
            ("Meal", MARGIN, COL_MEAL_W),
            ("Description", MARGIN + COL_MEAL_W, COL_DESC_W),
            ("Calories", MARGIN + COL_MEAL_W + COL_DESC_W, COL_CAL_W),
            (
                "Protein",
                MARGIN + COL_MEAL_W + COL_DESC_W + COL_CAL_W,
                COL_PROT_W,
            ),
        ];
        for (label, x, w) in labels {
            self.canvas.draw_text(
                label,
                x + CELL_INSET,
                y + CELL_INSET,
                w - 2.0 * CELL_INSET,
                TextStyle::heading(),
            );
        }
        self.cursor += HEADER_ROW_H;
    }

    fn row_height(&self, meal: &Meal) -> f64 {
        // row height follows the longer of title/description wrapped at the
        // description column's width
        let description = meal.description.as_deref().unwrap_or("");
        let longer = if description.len() >= meal.title.len() {
            description
        } else {
            &meal.title
        };
        let measured = self.canvas.measure_height(
            longer,
            COL_DESC_W - 2.0 * CELL_INSET,
            TextStyle::body(),
        );
        (measured + ROW_PADDING).max(MIN_ROW_H)
    }

    fn draw_meal_row(&mut self, meal: &Meal) {
        let row_h = self.row_height(meal);
        if self.cursor + row_h > self.bottom() {
            self.break_page();
            self.draw_table_header();
        }
        let y = self.cursor;
        self.canvas.stroke_rect(MARGIN, y, TABLE_W, row_h);

        let body = TextStyle::body();
        self.canvas.draw_text(
            &meal.title,
            MARGIN + CELL_INSET,
            y + CELL_INSET,
            COL_MEAL_W - 2.0 * CELL_INSET,
            body,
        );
        if let Some(description) = meal.description.as_deref() {
            self.canvas.draw_text(
                description,
                MARGIN + COL_MEAL_W + CELL_INSET,
                y + CELL_INSET,
                COL_DESC_W - 2.0 * CELL_INSET,
                body,
            );
        }
        let calories = meal
            .calories
            .map(|c| format!("{c:.0}"))
            .unwrap_or_else(|| "-".into());
        let protein = meal
            .protein
            .map(|p| format!("{p:.0}"))
            .unwrap_or_else(|| "-".into());
        self.canvas.draw_text(
            &calories,
            MARGIN + COL_MEAL_W + COL_DESC_W + CELL_INSET,
            y + CELL_INSET,
            COL_CAL_W - 2.0 * CELL_INSET,
            body,
        );
        self.canvas.draw_text(
            &protein,
            MARGIN + COL_MEAL_W + COL_DESC_W + COL_CAL_W + CELL_INSET,
            y + CELL_INSET,
            COL_PROT_W - 2.0 * CELL_INSET,
            body,
        );
        self.cursor += row_h;
    }

    pub fn render(&mut self, plan: &Plan, generated_at: &str) {
        self.canvas.draw_text(
            "Meal Plan",
            MARGIN,
            self.cursor,
            TABLE_W,
            TextStyle::title(),
        );
        self.cursor += 28.0;
        self.canvas.draw_text(
            &format!("Generated {generated_at}"),
            MARGIN,
            self.cursor,
            TABLE_W,
            TextStyle::body(),
        );
        self.cursor += 24.0;

        for day in &plan.days {
            if day.meals.is_empty() {
                // placeholder instead of a table; no row-height math here
                self.ensure_fits(DAY_LABEL_H + MIN_ROW_H);
                self.canvas.draw_text(
                    &day.day,
                    MARGIN,
                    self.cursor,
                    TABLE_W,
                    TextStyle::heading(),
                );
                self.cursor += DAY_LABEL_H;
                self.canvas.draw_text(
                    "No meals for this day",
                    MARGIN,
                    self.cursor,
                    TABLE_W,
                    TextStyle::placeholder(),
                );
                self.cursor += MIN_ROW_H;
                continue;
            }

            self.ensure_fits(DAY_LABEL_H + HEADER_ROW_H + MIN_ROW_H);
            self.canvas.draw_text(
                &day.day,
                MARGIN,
                self.cursor,
                TABLE_W,
                TextStyle::heading(),
            );
            self.cursor += DAY_LABEL_H;
            self.draw_table_header();
            for (_, meal) in day.meals_in_order() {
                self.draw_meal_row(meal);
            }
            self.cursor += DAY_GAP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::model::DayPlan;
    use std::cell::Cell;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Page,
        Text(String),
        Fill,
        Stroke,
    }

    struct FakeCanvas {
        ops: Vec<Op>,
        measures: Cell<usize>,
        page_height: f64,
    }

    impl FakeCanvas {
        fn new(page_height: f64) -> Self {
            Self {
                ops: Vec::new(),
                measures: Cell::new(0),
                page_height,
            }
        }

        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn page_breaks(&self) -> usize {
            self.ops.iter().filter(|op| **op == Op::Page).count()
        }
    }

    impl Canvas for FakeCanvas {
        fn page_height(&self) -> f64 {
            self.page_height
        }

        fn start_page(&mut self) {
            self.ops.push(Op::Page);
        }

        fn measure_height(&self, text: &str, width: f64, style: TextStyle) -> f64 {
            self.measures.set(self.measures.get() + 1);
            let per_line = (width / (style.size * 0.5)).max(1.0) as usize;
            let lines = text.len().div_ceil(per_line).max(1);
            lines as f64 * style.size * 1.3
        }

        fn draw_text(&mut self, text: &str, _x: f64, _y: f64, _width: f64, _style: TextStyle) {
            self.ops.push(Op::Text(text.to_string()));
        }

        fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, _gray: f64) {
            self.ops.push(Op::Fill);
        }

        fn stroke_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
            self.ops.push(Op::Stroke);
        }
    }

    fn meal(title: &str, description: Option<&str>) -> Meal {
        Meal {
            title: title.into(),
            description: description.map(Into::into),
            calories: Some(400.0),
            protein: Some(25.0),
            completed: false,
        }
    }

    fn day(label: &str, meals: Vec<(&str, Meal)>) -> DayPlan {
        DayPlan {
            day: label.into(),
            meals: meals
                .into_iter()
                .map(|(slot, m)| (slot.to_string(), m))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn empty_day_renders_placeholder_without_measuring() {
        let plan = Plan {
            days: vec![day("Day 1", vec![])],
        };
        let mut canvas = FakeCanvas::new(842.0);
        ReportLayout::new(&mut canvas).render(&plan, "2026-08-29");

        assert!(canvas.texts().contains(&"No meals for this day"));
        assert_eq!(canvas.measures.get(), 0);
        // no table header either
        assert!(!canvas.texts().contains(&"Description"));
    }

    #[test]
    fn renders_header_and_rows_for_a_day_with_meals() {
        let plan = Plan {
            days: vec![day(
                "Day 1",
                vec![
                    ("breakfast", meal("Oats", Some("rolled oats with milk"))),
                    ("dinner", meal("Stew", None)),
                ],
            )],
        };
        let mut canvas = FakeCanvas::new(842.0);
        ReportLayout::new(&mut canvas).render(&plan, "2026-08-29");

        let texts = canvas.texts();
        assert!(texts.contains(&"Meal Plan"));
        assert!(texts.contains(&"Day 1"));
        assert!(texts.contains(&"Oats"));
        assert!(texts.contains(&"rolled oats with milk"));
        assert!(texts.contains(&"400"));
        // missing description renders nothing in that cell, numbers still show
        assert!(texts.contains(&"Stew"));
        assert_eq!(canvas.page_breaks(), 0);
    }

    #[test]
    fn absent_numbers_render_as_dash() {
        let mut m = meal("Soup", None);
        m.calories = None;
        m.protein = None;
        let plan = Plan {
            days: vec![day("Day 1", vec![("lunch", m)])],
        };
        let mut canvas = FakeCanvas::new(842.0);
        ReportLayout::new(&mut canvas).render(&plan, "2026-08-29");
        let dashes = canvas.texts().iter().filter(|t| **t == "-").count();
        assert_eq!(dashes, 2);
    }

    #[test]
    fn long_day_breaks_page_and_redraws_header() {
        let meals: Vec<(String, Meal)> = (0..40)
            .map(|i| (format!("slot{i:02}"), meal(&format!("Meal {i}"), None)))
            .collect();
        let plan = Plan {
            days: vec![DayPlan {
                day: "Day 1".into(),
                meals: meals.into_iter().collect(),
            }],
        };
        let mut canvas = FakeCanvas::new(400.0);
        ReportLayout::new(&mut canvas).render(&plan, "2026-08-29");

        assert!(canvas.page_breaks() >= 1);
        let headers = canvas
            .texts()
            .iter()
            .filter(|t| **t == "Description")
            .count();
        // one header per page the table touches
        assert_eq!(headers, canvas.page_breaks() + 1);
    }

    #[test]
    fn new_day_near_bottom_starts_on_fresh_page() {
        let filler: Vec<(String, Meal)> = (0..12)
            .map(|i| (format!("slot{i:02}"), meal(&format!("Meal {i}"), None)))
            .collect();
        let plan = Plan {
            days: vec![
                DayPlan {
                    day: "Day 1".into(),
                    meals: filler.into_iter().collect(),
                },
                day("Day 2", vec![("breakfast", meal("Oats", None))]),
            ],
        };
        let mut canvas = FakeCanvas::new(420.0);
        ReportLayout::new(&mut canvas).render(&plan, "2026-08-29");
        assert!(canvas.page_breaks() >= 1);
        assert!(canvas.texts().contains(&"Day 2"));
    }
}
