use std::f64::consts::TAU;
use std::fmt;

/// Points on the line chart grid.
pub const LINE_SAMPLES: usize = 100;
/// Bars taken from the start of the line grid.
pub const BAR_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Line, ChartKind::Bar];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive linspace over [0, 2pi].
pub fn sample_grid() -> Vec<f64> {
    let step = TAU / (LINE_SAMPLES - 1) as f64;
    (0..LINE_SAMPLES).map(|i| i as f64 * step).collect()
}

/// Width of a single bar, a fraction of the grid spacing so bars don't touch.
pub fn bar_width() -> f64 {
    0.8 * TAU / (LINE_SAMPLES - 1) as f64
}

/// Values currently on screen. Positions are fixed once built,
/// only `ys` changes while animating.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub kind: ChartKind,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Waveform {
    pub fn initial(kind: ChartKind) -> Self {
        let mut xs = sample_grid();
        let ys = match kind {
            ChartKind::Line => xs.iter().map(|x| x.sin()).collect(),
            ChartKind::Bar => {
                xs.truncate(BAR_COUNT);
                xs.iter().map(|x| x.sin().abs()).collect()
            }
        };
        Self { kind, xs, ys }
    }

    pub fn apply_frame(&mut self, frame: usize) {
        let phase = frame as f64 / 10.0;
        match self.kind {
            ChartKind::Line => {
                for (y, x) in self.ys.iter_mut().zip(&self.xs) {
                    *y = (x + phase).sin();
                }
            }
            // heights follow the bar index, not the bar position
            ChartKind::Bar => {
                for (k, y) in self.ys.iter_mut().enumerate() {
                    *y = (k as f64 + phase).sin().abs();
                }
            }
        }
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(&self.ys).map(|(x, y)| [*x, *y])
    }
}
