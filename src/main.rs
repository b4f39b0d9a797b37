use std::io::{self, IsTerminal, Write};

use clap::{CommandFactory, Parser};

use img2ascii::animation::{cancel_channel, AnimatedSource, CancelSignal, Playback, PlayerError};
use img2ascii::ascii;
use img2ascii::cli::{handle_config_action, Args, Command};
use img2ascii::config::{Config, RenderOptions};
use img2ascii::input::{read_stdin, Fetcher, ImageData};
use img2ascii::source::{self, Decoded};
use img2ascii::terminal::{self, Interrupt, INTERRUPT_EXIT_CODE};
use img2ascii::Error;

/// Play an animation in place until it completes or is cancelled.
async fn play_animation(
    name: &str,
    animation: &AnimatedSource,
    options: &RenderOptions,
    terminal_size: (u16, u16),
    interrupt: &Interrupt,
    cancel: &mut CancelSignal,
) -> Result<(), Error> {
    let config = options
        .to_render_config(animation.canvas_width, animation.canvas_height, terminal_size)
        .map_err(|e| Error::from(e).for_source(name))?;

    // Drop abort keys pressed before this animation started
    cancel.take();

    interrupt.set_animating(true);
    let result = terminal::play_in_terminal(animation, &config, &mut io::stdout(), cancel).await;
    interrupt.set_animating(false);

    match result {
        Ok(Playback::Completed) => log::debug!("finished playing {}", name),
        Ok(Playback::Cancelled) => log::info!("stopped playing {}", name),
        Err(PlayerError::Config(e)) => return Err(Error::from(e).for_source(name)),
        Err(PlayerError::Io(source)) => {
            return Err(Error::Playback {
                name: name.to_string(),
                source,
            })
        }
    }
    Ok(())
}

/// Render one acquired source: animated GIFs are played in place, everything
/// else is printed once.
async fn process(
    data: &ImageData,
    options: &RenderOptions,
    terminal_size: (u16, u16),
    interrupt: &Interrupt,
    cancel: &mut CancelSignal,
) -> Result<(), Error> {
    let name = data.name.as_str();

    let image = match source::decode(name, &data.bytes, options.animate)? {
        Decoded::Still(image) => image,
        Decoded::Animated(animation) => {
            return play_animation(name, &animation, options, terminal_size, interrupt, cancel).await
        }
    };
    let (width, height) = image.dimensions();
    let config = options
        .to_render_config(width, height, terminal_size)
        .map_err(|e| Error::from(e).for_source(name))?;
    let text = ascii::render(&image, &config).map_err(|e| Error::from(e).for_source(name))?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|source| Error::Playback {
            name: name.to_string(),
            source,
        })
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let file_config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let colorterm = std::env::var("COLORTERM").ok();
    let options = match args.render_options(&file_config, colorterm.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(Command::Config { action }) = args.command.clone() {
        if let Err(e) = handle_config_action(action, &args.config_path(), &options) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let terminal_size = terminal::size();
    if let Err(e) = options.validate(terminal_size) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let stdin_is_terminal = io::stdin().is_terminal();
    if args.sources.is_empty() && stdin_is_terminal {
        let _ = Args::command().print_help();
        return;
    }

    let (cancel, mut signal) = cancel_channel();
    let interrupt = Interrupt::default();
    if let Err(e) = terminal::setup_ctrlc_handler(interrupt.clone(), cancel.clone()) {
        log::warn!("could not set up Ctrl+C handler: {}", e);
    }

    let inputs = if args.sources.is_empty() {
        vec![read_stdin().await]
    } else {
        let fetcher = match Fetcher::new() {
            Ok(fetcher) => fetcher,
            Err(e) => {
                eprintln!("Error: unable to create HTTP client: {}", e);
                std::process::exit(1);
            }
        };
        fetcher.acquire_all(&args.sources).await
    };

    // Keys can only be read when stdin is the terminal rather than image data
    let listener = stdin_is_terminal
        .then(|| terminal::spawn_key_listener(cancel.clone(), interrupt.clone()));

    let mut errors = Vec::new();
    for input in inputs {
        if interrupt.is_requested() {
            break;
        }
        let result = match input {
            Ok(data) => process(&data, &options, terminal_size, &interrupt, &mut signal).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            errors.push(e);
        }
    }

    if let Some(listener) = listener {
        listener.abort();
    }

    for e in &errors {
        log::error!("{}", e);
    }

    if interrupt.is_requested() {
        let _ = terminal::restore_cursor();
        std::process::exit(INTERRUPT_EXIT_CODE);
    }
    if !errors.is_empty() {
        std::process::exit(1);
    }
}
