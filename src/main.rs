// What you SEE:
// • A phone screen filling the window, with a tap counter in the middle.
// • Click (left mouse): the counter goes up and coloured glitch bars pile onto the screen.
// • Around 100 clicks the phone "dies": black screen, red MORTEM, frozen.
// • Resizing the window re-stretches the screen (and redraws MORTEM once if dead). ESC quits.

mod app;
mod config;
mod draw;
mod error;
mod glitch;
mod input;
mod integrity;
mod render;
mod skin;
mod types;

use app::App;
use config::Config;
use draw::Drawer;
use error::Error;
use input::InputController;
use skin::Skin;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::init();

    let cfg = Config::from_env();
    let seed = cfg.seed.unwrap_or_else(rand::random::<u64>);
    log::info!(
        "MORTEM starting: skin={}, window={}x{}, seed={seed}",
        cfg.skin_path.display(),
        cfg.width,
        cfg.height
    );

    /* --- Skin + window setup ---
       A broken or missing skin stops us here, before any window opens. */
    let mut skin = Skin::load(&cfg.skin_path)?;
    let native = skin.native_size();
    log::info!("skin loaded ({}x{})", native.width, native.height);

    let mut drawer = Drawer::new("MORTEM", cfg.width, cfg.height)?;

    /* --- State + reusable screen buffer --- */
    let mut app = App::new(drawer.viewport(), seed);
    let mut input = InputController::new();
    let mut screen = FrameBuffer::filled(app.viewport().width, app.viewport().height, 0);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Follow the window size. Glitches keep their absolute positions. */
        let viewport = drawer.viewport();
        if app.resize(viewport) {
            screen = FrameBuffer::filled(viewport.width, viewport.height, 0);
        }

        /* 2) Taps run to completion before anything is drawn. */
        input.poll(drawer.left_mouse_down(), &mut app.session);

        /* 3) Draw + present, or just keep the window alive while frozen/minimised. */
        if app.wants_frame() && !screen.pixels.is_empty() {
            let background = skin.fitted(viewport);
            app.draw(background, &mut screen);
            drawer.present(&screen)?;
        } else {
            drawer.pump();
        }
    }

    log::info!("window closed at {} taps", app.session.integrity.counter());
    Ok(())
}
