use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use taranis::{Argument, CommandLineInterface, Value};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_tracing();

    let greetings = Rc::new(RefCell::new(Vec::new()));
    let sink = greetings.clone();

    let mut cli = CommandLineInterface::versioned("My Cool App", "1.2.3.4-abc")
        .with_description("Shows what taranis made of the command line.")
        .with_flag("mouse", "Force mouse to be displayed in release build.")?
        .with_value("remote", "Address of the remote host.", Some("1.2.3.4"))?
        .with_argument(Argument::action("greet", "Greet someone.", move |v: &Value| {
            let who = v.as_str().unwrap_or("world").to_string();
            sink.borrow_mut().push(who);
        }))
        .context("failed to build the command line interface")?;

    tracing::debug!(executable = cli.executable_name(), "processing arguments");
    cli.process_env()?;

    println!("Show Mouse? {}", if cli.is_set("mouse") { "Yes" } else { "No" });
    println!("Remote: {}", cli.value("remote"));
    for who in greetings.borrow().iter() {
        println!("Hello, {who}!");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
