//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner shown when the terminal chat starts.
pub fn print_welcome_banner(endpoint: &str) {
    println!();
    println!("  * {}", style("StudyMaster Support").cyan().bold());
    println!();
    println!("  {}  {}", style("Relay:").bold(), style(endpoint).dim());
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
