//! Input replay entry point (native).

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "-".to_string());
    log::info!("Replaying input script from {}", path);

    let result = golboard_app::replay::load_script(&path).and_then(|script| {
        let stdout = std::io::stdout();
        golboard_app::replay::run(&script, &mut stdout.lock())
    });

    if let Err(e) = result {
        log::error!("Replay failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
