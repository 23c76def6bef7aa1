use mazeviz::app::App;

/// Default maze size. Must be odd so the carver's interior lattice fits.
const DEFAULT_SIZE: u8 = 31;

fn main() -> std::io::Result<()> {
    let (size, seed) = match parse_args() {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Usage: mazeviz [--size N] [--seed S]   (N odd, between 5 and 255)");
            return Ok(());
        }
    };

    // Raw mode owns stdout, so logs go to a file instead.
    let file_appender = tracing_appender::rolling::never(".", "mazeviz.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut app = match App::new(size, seed) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Failed to generate the initial maze: {}", err);
            return Ok(());
        }
    };

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run();
    App::restore_terminal(&mut stdout)?;
    result
}

fn parse_args() -> Result<(u8, Option<u64>), String> {
    let mut size = DEFAULT_SIZE;
    let mut seed = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                size = args
                    .next()
                    .and_then(|s| s.parse::<u8>().ok())
                    .ok_or_else(|| "--size expects a number between 5 and 255".to_string())?;
                if size < 5 || size % 2 == 0 {
                    return Err(format!("maze size must be odd and at least 5, got {}", size));
                }
            }
            "--seed" => {
                seed = Some(
                    args.next()
                        .and_then(|s| s.parse::<u64>().ok())
                        .ok_or_else(|| "--seed expects a number".to_string())?,
                );
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok((size, seed))
}
