//! Progress bar display for downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for a single download
///
/// Uses a byte bar when the server sent a `Content-Length`, a spinner
/// otherwise. indicatif hides the bar on its own when stderr is not a
/// terminal, so logs and piped output stay clean.
pub fn download_bar(total_bytes: Option<u64>, label: &str) -> ProgressBar {
    let pb = match total_bytes {
        Some(total) => {
            let style = ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            let pb = ProgressBar::new(total);
            pb.set_style(style);
            pb
        }
        None => {
            let style = ProgressStyle::with_template("{spinner} {msg} {bytes}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            let pb = ProgressBar::new_spinner();
            pb.set_style(style);
            pb
        }
    };

    pb.set_message(label.to_string());
    pb
}

/// Last path segment of a URL, for progress labels
pub fn label_for(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(url)
}
