use egui::Color32;
use anyhow::Result;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, PlotResponse};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::animation::{Animation, FRAME_COUNT, Playback, frame_interval, parse_duration};
use crate::chart::{ChartKind, Waveform, bar_width};
use crate::config::Args;
use crate::style::{ChartStyle, to_hex};

pub struct ChartAnimationApp {
    chart_kind: ChartKind,
    waveform: Waveform,
    style: ChartStyle,

    // controls
    duration_text: String,
    repeat: bool,

    // playback
    animation: Option<Animation>,
    // None until a run puts a frame on screen
    frame: Option<usize>,
}

impl ChartAnimationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, args: &Args) -> Self {
        Self::from_args(args)
    }

    fn from_args(args: &Args) -> Self {
        info!(
            "starting with {} chart, duration {:?}s, repeat {}",
            args.chart_type, args.duration, args.repeat
        );
        Self {
            chart_kind: args.chart_type,
            waveform: Waveform::initial(args.chart_type),
            style: args.style(),
            duration_text: args.duration.clone(),
            repeat: args.repeat,
            animation: None,
            frame: None,
        }
    }

    /// Stop playback and put the untouched waveform back on screen.
    fn create_chart(&mut self) {
        if self.animation.take().is_some() {
            debug!("stopped running animation");
        }
        self.waveform = Waveform::initial(self.chart_kind);
        self.frame = None;
    }

    fn select_chart(&mut self, kind: ChartKind) {
        if kind == self.chart_kind {
            return;
        }
        debug!("chart type changed to {kind}");
        self.chart_kind = kind;
        self.create_chart();
    }

    /// Leaves everything untouched when the duration doesn't parse.
    fn start_animation(&mut self) -> Result<()> {
        let secs = parse_duration(&self.duration_text)?;

        self.create_chart();
        // first frame replaces the static chart right away
        self.waveform.apply_frame(0);
        self.frame = Some(0);
        let interval = frame_interval(secs);
        info!(
            "animating {} chart: {FRAME_COUNT} frames every {:?}{}",
            self.chart_kind,
            interval,
            if self.repeat { ", looping" } else { "" }
        );
        self.animation = Some(Animation::start(interval, self.repeat, Instant::now()));
        Ok(())
    }

    fn stop_animation(&mut self) {
        if self.animation.take().is_some() {
            info!("animation stopped at frame {}", self.frame.unwrap_or(0));
        }
    }

    /// Advance playback to `now`. Returns how long until the next frame is due,
    /// or `None` once nothing is playing.
    fn tick_at(&mut self, now: Instant) -> Option<Duration> {
        let anim = self.animation.as_ref()?;
        let playback = anim.frame_at(now);
        let frame = playback.frame();
        if Some(frame) != self.frame {
            self.waveform.apply_frame(frame);
            self.frame = Some(frame);
        }

        match playback {
            Playback::Running(_) => Some(anim.next_deadline(now)),
            Playback::Finished(_) => {
                self.animation = None;
                info!("animation finished");
                None
            }
        }
    }

    fn status_label(&self) -> String {
        match self.frame {
            Some(frame) => format!("Frame {}/{FRAME_COUNT}", frame + 1),
            None => format!("Frame -/{FRAME_COUNT}"),
        }
    }

    fn ui_controls(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("controls_grid")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Chart Type:");
                let mut selected = self.chart_kind;
                egui::ComboBox::from_id_salt("chart_type")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for kind in ChartKind::ALL {
                            ui.selectable_value(&mut selected, kind, kind.label());
                        }
                    });
                self.select_chart(selected);
                ui.end_row();

                ui.label("Animation Duration (seconds):");
                ui.add(egui::TextEdit::singleline(&mut self.duration_text).desired_width(120.0));
                ui.end_row();

                color_button(ui, "Background Color", &mut self.style.background);
                let kind = self.chart_kind;
                color_button(ui, "Line/Bar Color", self.style.series_color_mut(kind));
                color_button(ui, "Axes Color", &mut self.style.axis_color);
                ui.end_row();
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Start Animation").clicked() {
                match self.start_animation() {
                    Ok(()) => ui.ctx().request_repaint(),
                    Err(e) => {
                        warn!("rejected duration {:?}: {e}", self.duration_text);
                        show_error("Invalid Input", &e.to_string());
                    }
                }
            }
            if ui
                .add_enabled(self.animation.is_some(), egui::Button::new("Stop"))
                .clicked()
            {
                self.stop_animation();
            }
            ui.checkbox(&mut self.repeat, "Loop")
                .on_hover_text("Applies to the next start");

            ui.separator();
            ui.label(self.status_label());
        });
    }

    fn ui_chart(&self, ui: &mut egui::Ui) -> PlotResponse<()> {
        let color = self.style.series_color(self.chart_kind);
        ui.scope(|ui| {
            self.style.apply_to(ui.visuals_mut());

            Plot::new("chart")
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .allow_axis_zoom_drag(false)
                .allow_double_click_reset(false)
                .show_x(false)
                .show_y(false)
                .include_y(-1.0)
                .include_y(1.0)
                .show(ui, |plot_ui| match self.waveform.kind {
                    ChartKind::Line => {
                        let points: PlotPoints = self.waveform.points().collect();
                        plot_ui.line(Line::new("sine", points).color(color).width(2.0));
                    }
                    ChartKind::Bar => {
                        let bars = self
                            .waveform
                            .points()
                            .map(|[x, h]| Bar::new(x, h).width(bar_width()).fill(color))
                            .collect();
                        plot_ui.bar_chart(BarChart::new("sine", bars).color(color));
                    }
                })
        })
        .inner
    }
}

fn color_button(ui: &mut egui::Ui, label: &str, color: &mut Color32) {
    ui.horizontal(|ui| {
        if ui.color_edit_button_srgba(color).changed() {
            debug!("{label} set to {}", to_hex(*color));
        }
        ui.label(label);
    });
}

fn show_error(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

impl eframe::App for ChartAnimationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(wait) = self.tick_at(Instant::now()) {
            ctx.request_repaint_after(wait);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.ui_controls(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_chart(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use egui::{Event, PointerButton, Pos2, RawInput, Rect, vec2};

    fn app(extra: &[&str]) -> ChartAnimationApp {
        let argv = std::iter::once("chartanim").chain(extra.iter().copied());
        ChartAnimationApp::from_args(&Args::parse_from(argv))
    }

    fn expected(kind: ChartKind, frame: usize) -> Waveform {
        let mut w = Waveform::initial(kind);
        w.apply_frame(frame);
        w
    }

    #[test]
    fn idle_app_shows_static_chart() {
        let app = app(&[]);
        assert!(app.animation.is_none());
        assert_eq!(app.waveform, Waveform::initial(ChartKind::Line));
        assert_eq!(app.status_label(), "Frame -/100");
    }

    #[test]
    fn start_shows_first_frame_immediately() {
        let mut app = app(&["--chart-type", "bar"]);
        app.start_animation().unwrap();
        assert!(app.animation.is_some());
        assert_eq!(app.frame, Some(0));
        // the static bar chart and frame 0 differ, so this is the animated one
        assert_ne!(app.waveform, Waveform::initial(ChartKind::Bar));
        assert_eq!(app.waveform, expected(ChartKind::Bar, 0));
        assert_eq!(app.status_label(), "Frame 1/100");
    }

    #[test]
    fn restart_resets_frame() {
        let mut app = app(&[]);
        app.start_animation().unwrap();
        app.tick_at(Instant::now() + Duration::from_millis(1_550));
        assert_eq!(app.frame, Some(15));
        app.start_animation().unwrap();
        assert_eq!(app.frame, Some(0));
        assert_eq!(app.waveform, expected(ChartKind::Line, 0));
    }

    #[test]
    fn invalid_duration_leaves_state_alone() {
        let mut app = app(&["--duration", "ten"]);
        let err = app.start_animation().unwrap_err();
        assert_eq!(err.to_string(), "Duration must be a number.");
        assert!(app.animation.is_none());
        assert_eq!(app.frame, None);
        assert_eq!(app.waveform, Waveform::initial(ChartKind::Line));
    }

    #[test]
    fn finished_run_holds_last_frame() {
        let mut app = app(&["--duration", "10"]);
        app.start_animation().unwrap();
        let wait = app.tick_at(Instant::now() + Duration::from_millis(250));
        assert!(wait.is_some());

        assert_eq!(app.tick_at(Instant::now() + Duration::from_secs(60)), None);
        assert!(app.animation.is_none());
        assert_eq!(app.frame, Some(99));
        assert_eq!(app.waveform, expected(ChartKind::Line, 99));
        assert_eq!(app.status_label(), "Frame 100/100");

        // nothing left to advance
        assert_eq!(app.tick_at(Instant::now() + Duration::from_secs(120)), None);
        assert_eq!(app.waveform, expected(ChartKind::Line, 99));
    }

    #[test]
    fn stop_keeps_current_frame() {
        let mut app = app(&[]);
        app.start_animation().unwrap();
        app.tick_at(Instant::now() + Duration::from_millis(450));
        assert_eq!(app.frame, Some(4));

        app.stop_animation();
        assert!(app.animation.is_none());
        assert_eq!(app.frame, Some(4));
        assert_eq!(app.waveform, expected(ChartKind::Line, 4));
        assert_eq!(app.tick_at(Instant::now() + Duration::from_secs(5)), None);
        assert_eq!(app.frame, Some(4));
    }

    #[test]
    fn changing_chart_type_stops_and_resets() {
        let mut app = app(&[]);
        app.start_animation().unwrap();
        app.tick_at(Instant::now() + Duration::from_millis(800));

        app.select_chart(ChartKind::Bar);
        assert!(app.animation.is_none());
        assert_eq!(app.frame, None);
        assert_eq!(app.waveform, Waveform::initial(ChartKind::Bar));
        assert_eq!(app.status_label(), "Frame -/100");
    }

    #[test]
    fn reselecting_same_type_keeps_playing() {
        let mut app = app(&[]);
        app.start_animation().unwrap();
        app.select_chart(ChartKind::Line);
        assert!(app.animation.is_some());
        assert_eq!(app.frame, Some(0));
    }

    #[test]
    fn axis_drag_does_not_zoom() {
        let app = app(&[]);
        let ctx = egui::Context::default();
        let screen = Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0));
        let mut time = 0.0;

        let mut frame = |events: Vec<Event>| {
            time += 0.1;
            let input = RawInput {
                screen_rect: Some(screen),
                time: Some(time),
                events,
                ..Default::default()
            };
            let mut shown = None;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let plot = app.ui_chart(ui);
                    shown = Some((plot.response.rect, *plot.transform.bounds()));
                });
            });
            shown.unwrap()
        };

        frame(vec![]);
        let (rect, before) = frame(vec![]);

        // left of the plot frame is the y axis
        let grab = Pos2::new(rect.min.x - 8.0, rect.center().y);
        frame(vec![
            Event::PointerMoved(grab),
            Event::PointerButton {
                pos: grab,
                button: PointerButton::Primary,
                pressed: true,
                modifiers: Default::default(),
            },
        ]);
        for dy in [20.0, 40.0, 60.0] {
            frame(vec![Event::PointerMoved(grab + vec2(0.0, dy))]);
        }
        let release = grab + vec2(0.0, 60.0);
        frame(vec![Event::PointerButton {
            pos: release,
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Default::default(),
        }]);
        let (_, after) = frame(vec![]);

        assert_eq!(before.min(), after.min());
        assert_eq!(before.max(), after.max());
    }
}
