//! Native walkthrough of the navigator against the in-memory host.
//!
//! Runs the home → nav → back round trip, then the unknown-path failure,
//! logging every mount through `tracing`.

use spa_nav::prelude::*;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return;
    }
    let start_path = args.get(1).map(String::as_str).unwrap_or(ROOT_PATH);

    if let Err(e) = run(start_path) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn print_help() {
    println!("spa-nav [START_PATH]");
    println!();
    println!("Mounts the view for START_PATH (default `/`) in an in-memory host,");
    println!("follows the first trigger of each view, steps back, and finally");
    println!("requests an unknown path to show the lookup failure.");
}

fn run(start_path: &str) -> Result<(), NavError> {
    let build = BuildInfo::current()?;
    info!(version = build.version, debug = build.debug, "spa-nav");

    let routes = RouteTable::from_config(&build.config);
    let mut nav = Navigator::new(MemoryHost::new(start_path), routes);
    nav.start()?;
    report(&nav);

    let trigger = nav.bindings().first().map(|b| b.element_id.clone());
    if let Some(id) = trigger {
        let events = nav.host().click(&id);
        for event in events {
            nav.dispatch(event)?;
        }
        report(&nav);
    }

    let events = nav.host_mut().back();
    for event in events {
        nav.dispatch(event)?;
    }
    report(&nav);

    match nav.go("/unknown") {
        Err(e) if e.is_unknown_path() => info!("expected failure: {e}"),
        Err(e) => return Err(e),
        Ok(()) => info!("`/unknown` unexpectedly resolved"),
    }
    report(&nav);
    Ok(())
}

fn report(nav: &Navigator<MemoryHost>) {
    let host = nav.host();
    info!(
        location = %host.current_path(),
        title = %host.title(),
        history = host.history_len(),
        state = ?nav.state(),
        "current page"
    );
}
