use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Vitis".bold().bright_magenta(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Viticulture statistics from Vitibrasil\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print a labelled detail line
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print timing with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let value = format!("{:>8.2}ms", ms);

    if ms < 500.0 {
        eprintln!("  {} {}", format!("{}:", label).dimmed(), value.green());
    } else if ms < 2000.0 {
        eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_yellow());
    } else {
        eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_red());
    }
}

/// Print extraction summary
pub fn print_extraction_details(result: &vitis_core::ExtractionResult) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Extraction Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    print_detail("Title", &result.title);
    print_detail("Columns", &result.headers.len().to_string());
    print_detail("Rows", &result.rows.len().to_string());
    if let Some(message) = &result.message {
        print_warning(message);
    }
    eprintln!();
}

/// Format byte size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
