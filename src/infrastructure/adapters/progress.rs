//! 다운로드 진행률 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::application::ports::DownloadProgress;

const BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner} {bytes} downloaded";

/// stderr가 TTY일 때만 그려지는 다운로드 진행 막대.
/// 크기를 모르는 응답은 스피너로 표시한다.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let target = if io::stderr().is_terminal() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        Self::with_draw_target(target)
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, target),
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl DownloadProgress for ConsoleProgress {
    fn start(&self, total_bytes: Option<u64>) {
        self.bar.reset();
        match total_bytes.filter(|total| *total > 0) {
            Some(total) => {
                self.bar.set_style(bar_style());
                self.bar.set_length(total);
            }
            None => self.bar.set_style(spinner_style()),
        }
    }

    fn advance(&self, received_bytes: u64) {
        self.bar.set_position(received_bytes);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
