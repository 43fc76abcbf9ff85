//! Version command implementation.

use console::style;

/// Crate name and version of every workspace component.
pub fn components() -> [(&'static str, &'static str); 3] {
    [
        ("qbell-ir", qbell_ir::VERSION),
        ("qbell-sim", qbell_sim::VERSION),
        ("qbell-cli", env!("CARGO_PKG_VERSION")),
    ]
}

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - two-qubit rotated Bell state simulator",
        style("qbell").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    for (name, version) in components() {
        println!("  {:<10} {}", name, style(format!("v{version}")).yellow());
    }
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
