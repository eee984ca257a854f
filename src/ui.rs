use crate::analysis;
use crate::fees::net_payout;
use crate::model::{AnalysisConfig, AnalysisOutcome, PriceBound, SaleReport};
use crate::stats::RECENCY_WINDOW_DAYS;

use chrono::{Local, NaiveDate};
use eframe::egui;
use egui::{Color32, Context, FontFamily, FontId, Margin, RichText, Stroke, Vec2, Visuals};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Plot, PlotPoints, Points};
use serde::{Deserialize, Serialize};

pub fn set_custom_style(ctx: &Context) {
    // Dark sneaker-shop theme, green accents
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Color32::from_rgb(14, 17, 15);
    visuals.window_fill = Color32::from_rgb(20, 24, 21);
    visuals.extreme_bg_color = Color32::from_rgb(28, 34, 30);
    visuals.faint_bg_color = Color32::from_rgb(24, 29, 26);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(32, 40, 35);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(50, 70, 58));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(40, 55, 46);
    visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, Color32::from_rgb(80, 190, 120));

    visuals.widgets.active.bg_fill = Color32::from_rgb(46, 66, 54);
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, Color32::from_rgb(110, 230, 150));

    visuals.selection.bg_fill = Color32::from_rgb(40, 70, 52);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(120, 235, 160));

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = Margin::same(12);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.indent = 16.0;

    style.text_styles.insert(
        egui::TextStyle::Body,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        FontId::new(22.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        FontId::new(14.0, FontFamily::Monospace),
    );

    ctx.set_style(style);
}

const ACCENT: Color32 = Color32::from_rgb(110, 230, 150);
const LABEL: Color32 = Color32::from_rgb(160, 185, 170);
const MUTED: Color32 = Color32::from_rgb(120, 140, 128);

/// Everything restored between runs: the paste and the sidebar settings.
/// The analysis core never sees this; it gets text + config per call.
#[derive(Serialize, Deserialize)]
struct Session {
    raw_text: String,
    min_price: f64,
    price_bound: PriceBound,
    velocity_window: usize,
    show_comparison: bool,
}

impl Default for Session {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Session {
            raw_text: String::new(),
            min_price: config.min_price,
            price_bound: config.price_bound,
            velocity_window: config.velocity_window,
            show_comparison: false,
        }
    }
}

const SESSION_FILE: &str = "session.json";

pub struct SoleApp {
    raw_text: String,
    min_price: f64,
    price_bound: PriceBound,
    velocity_window: usize,
    show_comparison: bool,

    outcome: Option<AnalysisOutcome>,
}

impl SoleApp {
    pub fn new() -> Self {
        let session = Self::load_session();
        Self {
            raw_text: session.raw_text,
            min_price: session.min_price,
            price_bound: session.price_bound,
            velocity_window: session.velocity_window.max(2),
            show_comparison: session.show_comparison,

            outcome: None,
        }
    }

    fn load_session() -> Session {
        use std::fs;
        if let Ok(data) = fs::read_to_string(SESSION_FILE) {
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            Session::default()
        }
    }

    fn save_session(&self) {
        use std::fs;
        let session = Session {
            raw_text: self.raw_text.clone(),
            min_price: self.min_price,
            price_bound: self.price_bound,
            velocity_window: self.velocity_window,
            show_comparison: self.show_comparison,
        };
        if let Ok(json) = serde_json::to_string(&session) {
            let _ = fs::write(SESSION_FILE, json);
        }
    }

    fn analyze(&mut self) {
        let config = AnalysisConfig {
            min_price: self.min_price,
            price_bound: self.price_bound,
            velocity_window: self.velocity_window,
        };
        let today = Local::now().date_naive();
        self.outcome = Some(analysis::run(&self.raw_text, &config, today));
        self.save_session();
    }

    fn show_report(&self, ui: &mut egui::Ui, report: &SaleReport) {
        let agg = &report.aggregate;

        ui.heading(
            RichText::new(format!("{}-Day Analysis", RECENCY_WINDOW_DAYS))
                .color(ACCENT)
                .strong(),
        );
        ui.add_space(6.0);

        egui::Grid::new("report_grid")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Qualifying sales").color(LABEL));
                ui.label(RichText::new(format!("{}", agg.count)).strong());
                ui.end_row();

                ui.label(RichText::new("Avg sold price").color(LABEL));
                ui.label(RichText::new(format!("£{:.2}", agg.avg_price)).strong());
                ui.end_row();

                ui.label(RichText::new("Avg net payout").color(LABEL));
                ui.label(RichText::new(format!("£{:.2}", agg.avg_net)).strong());
                ui.end_row();

                ui.label(RichText::new("Avg net (last 10)").color(LABEL));
                ui.label(RichText::new(format!("£{:.2}", agg.avg_net_last10)).strong());
                ui.end_row();

                ui.label(
                    RichText::new(format!("Days between sales (last {})", self.velocity_window))
                        .color(LABEL),
                );
                match agg.avg_days_primary {
                    Some(days) => {
                        ui.label(RichText::new(format!("{:.1}", days)).strong());
                    }
                    None => {
                        ui.label(RichText::new("n/a").color(MUTED));
                    }
                }
                ui.end_row();

                if self.show_comparison {
                    ui.label(RichText::new("Days between (last 10)").color(LABEL));
                    match agg.avg_days_last10 {
                        Some(days) => {
                            ui.label(format!("{:.1}", days));
                        }
                        None => {
                            ui.label(RichText::new("n/a").color(MUTED));
                        }
                    }
                    ui.end_row();

                    ui.label(RichText::new("Days between (last 50)").color(LABEL));
                    match agg.avg_days_last50 {
                        Some(days) => {
                            ui.label(format!("{:.1}", days));
                        }
                        None => {
                            ui.label(RichText::new("needs 50 sales").color(MUTED));
                        }
                    }
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(6.0);

        match (report.target_roi, report.max_pay) {
            (Some(roi), Some(max_pay)) => {
                ui.label(
                    RichText::new(format!("Target ROI: {:.0}%", roi * 100.0)).color(LABEL),
                );
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Recommended max price to pay: £{:.2}", max_pay))
                        .size(20.0)
                        .color(ACCENT)
                        .strong(),
                );
            }
            _ => {
                ui.label(
                    RichText::new("Not enough sales in the velocity window for a recommendation")
                        .color(MUTED),
                );
            }
        }

        ui.add_space(12.0);
        self.show_sales_chart(ui, report);
        ui.add_space(12.0);
        self.show_recent_sales(ui, report);
    }

    fn show_sales_chart(&self, ui: &mut egui::Ui, report: &SaleReport) {
        let today = Local::now().date_naive();
        let points: Vec<[f64; 2]> = report
            .sales
            .iter()
            .map(|s| [-((today - s.date).num_days() as f64), s.price])
            .collect();

        ui.label(RichText::new("Qualifying sales").color(LABEL).strong());
        Plot::new("sales_chart")
            .height(200.0)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("days ago")
            .y_axis_label("price (£)")
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new("Sales", PlotPoints::new(points))
                        .radius(3.5)
                        .color(ACCENT),
                );
            });
    }

    fn show_recent_sales(&self, ui: &mut egui::Ui, report: &SaleReport) {
        ui.label(RichText::new("Most recent sales").color(LABEL).strong());
        ui.add_space(4.0);

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(110.0)) // Date
            .column(Column::exact(100.0)) // Price
            .column(Column::exact(100.0)) // Net
            .header(26.0, |mut header| {
                header.col(|ui| {
                    ui.label(RichText::new("Date").color(LABEL).strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Price").color(LABEL).strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Net").color(LABEL).strong());
                });
            })
            .body(|mut body| {
                for sale in report.sales.iter().take(10) {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(format_date(sale.date));
                        });
                        row.col(|ui| {
                            ui.label(format!("£{:.2}", sale.price));
                        });
                        row.col(|ui| {
                            let net = net_payout(sale.price);
                            let color = if net < 0.0 { Color32::LIGHT_RED } else { Color32::LIGHT_GRAY };
                            ui.label(RichText::new(format!("£{:.2}", net)).color(color));
                        });
                    });
                }
            });
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

impl eframe::App for SoleApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new("👟 Sole Market Analyzer")
                        .color(ACCENT)
                        .strong()
                        .size(24.0),
                );
            });
            ui.add_space(4.0);
        });

        egui::SidePanel::right("settings")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                ui.heading(RichText::new("⚙ Settings").color(ACCENT));
                ui.separator();

                ui.label(RichText::new("💷 Minimum sale price").strong());
                ui.add(
                    egui::DragValue::new(&mut self.min_price)
                        .prefix("£")
                        .speed(1.0)
                        .range(0.0..=100_000.0),
                );
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.price_bound, PriceBound::Inclusive, "≥ min");
                    ui.selectable_value(&mut self.price_bound, PriceBound::Exclusive, "> min");
                });

                ui.add_space(10.0);
                ui.separator();

                ui.label(RichText::new("⏱ Velocity window").strong());
                ui.label(
                    RichText::new("Most recent sales used for the days-between figure")
                        .color(MUTED)
                        .small(),
                );
                ui.add(egui::Slider::new(&mut self.velocity_window, 2..=50));

                ui.add_space(10.0);
                ui.separator();

                ui.checkbox(&mut self.show_comparison, "Show 10/50-sale comparison");

                ui.add_space(10.0);
                ui.separator();

                if ui
                    .button(RichText::new("🔄 Reset Settings").color(Color32::from_rgb(255, 150, 150)))
                    .clicked()
                {
                    let defaults = AnalysisConfig::default();
                    self.min_price = defaults.min_price;
                    self.price_bound = defaults.price_bound;
                    self.velocity_window = defaults.velocity_window;
                    self.show_comparison = false;
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                RichText::new("Paste raw sales history (MM/DD/YY dates with £ prices)")
                    .color(LABEL),
            );
            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .id_salt("paste_area")
                .max_height(260.0)
                .show(ui, |ui| {
                    ui.add_sized(
                        Vec2::new(ui.available_width(), 250.0),
                        egui::TextEdit::multiline(&mut self.raw_text)
                            .hint_text("03/14/24 · UK 9.5\n£1,234\n...")
                            .font(egui::TextStyle::Monospace),
                    );
                });

            ui.add_space(6.0);
            if ui
                .add_sized(
                    Vec2::new(140.0, 32.0),
                    egui::Button::new(RichText::new("📊 Analyze").color(ACCENT).strong()),
                )
                .clicked()
            {
                self.analyze();
            }

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .id_salt("report_area")
                .show(ui, |ui| match &self.outcome {
                    None => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.label(RichText::new("👟").size(60.0).color(ACCENT));
                            ui.add_space(10.0);
                            ui.label(
                                RichText::new("Paste sales data and hit Analyze")
                                    .size(20.0)
                                    .color(LABEL),
                            );
                        });
                    }
                    Some(AnalysisOutcome::InsufficientData { qualifying }) => {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.label(RichText::new("🔍").size(48.0).color(MUTED));
                            ui.add_space(10.0);
                            let msg = match qualifying {
                                0 => format!(
                                    "No qualifying sales in the last {} days",
                                    RECENCY_WINDOW_DAYS
                                ),
                                _ => "Only one qualifying sale; need at least two".to_string(),
                            };
                            ui.label(RichText::new(msg).size(18.0).color(LABEL));
                            ui.add_space(5.0);
                            ui.label(
                                RichText::new("Try lowering the minimum price")
                                    .color(MUTED),
                            );
                        });
                    }
                    Some(AnalysisOutcome::Report(report)) => {
                        self.show_report(ui, report);
                    }
                });
        });
    }
}
