use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Step-wise progress reporting on stderr.
///
/// Interactive runs get a spinner per step plus a completion line with
/// substep details; quiet or non-tty runs get nothing.
pub struct Progress {
    bar: Option<ProgressBar>,
    enabled: bool,
    step: u8,
    total_steps: u8,
    run_start: Instant,
    step_start: Instant,
}

impl Progress {
    pub fn new(enabled: bool, total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            enabled,
            step: 0,
            total_steps,
            run_start: now,
            step_start: now,
        }
    }

    pub fn step(&mut self, description: &str) {
        self.clear_bar();
        self.step += 1;
        self.step_start = Instant::now();

        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!(
            "[{}/{}] {}...",
            self.step, self.total_steps, description
        ));
        self.bar = Some(bar);
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        self.clear_bar();
        if !self.enabled {
            return;
        }

        let elapsed = self.step_start.elapsed();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            elapsed.as_secs_f64()
        );
        for substep in substeps {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", substep);
        }
    }

    pub fn finish(mut self) {
        self.clear_bar();
        if !self.enabled {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m Extraction complete {:>30}",
            format!("Total: {:.2}s", self.run_start.elapsed().as_secs_f64())
        );
        let _ = writeln!(stderr);
    }

    fn clear_bar(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
