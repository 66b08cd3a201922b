//! kinesim - Terminal User Interface
//!
//! Animates a session on a ratatui canvas with the parameter panel beside
//! it. App logic lives in `kinesim::tui::app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::process::ExitCode {
    tui::main()
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use std::io;
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::time::{Duration, Instant};

    use clap::Parser;
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use kinesim::config::{DemoPreset, SessionConfig};
    use kinesim::engine::{FrameDriver, StepOutcome};
    use kinesim::error::KinResult;
    use kinesim::panel::FieldKind;
    use kinesim::render::{Color as KColor, RenderCommand};
    use kinesim::tui::{KinematicsApp, WallClockDriver};
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{
            canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
            Block, Borders, List, ListItem, Paragraph,
        },
        Frame, Terminal,
    };
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    /// Segments per dashed line.
    const DASHES: usize = 12;

    #[derive(Debug, Parser)]
    #[command(name = "kinesim_tui", version, about = "Animate a kinematics demo in the terminal")]
    struct Cli {
        /// Session configuration file (YAML)
        config: Option<PathBuf>,
        /// Built-in preset
        #[arg(long, value_enum, conflicts_with = "config")]
        preset: Option<DemoPreset>,
        /// Target frame interval in milliseconds
        #[arg(long, default_value_t = 33)]
        tick_ms: u64,
    }

    pub fn main() -> ExitCode {
        // logs would corrupt the alternate screen unless explicitly requested
        if std::env::var_os("RUST_LOG").is_some() {
            tracing_subscriber::registry()
                .with(tracing_subscriber::EnvFilter::from_default_env())
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }

        let cli = Cli::parse();
        let app = match load(&cli).and_then(KinematicsApp::new) {
            Ok(app) => app,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        };

        match run(app, Duration::from_millis(cli.tick_ms.max(1))) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("terminal error: {err}");
                ExitCode::FAILURE
            }
        }
    }

    fn load(cli: &Cli) -> KinResult<SessionConfig> {
        match (&cli.config, cli.preset) {
            (Some(path), _) => SessionConfig::load(path),
            (None, preset) => Ok(preset.unwrap_or_default().config()),
        }
    }

    /// Run the TUI application.
    fn run(mut app: KinematicsApp, tick_rate: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut driver = WallClockDriver::new();

        loop {
            let start = Instant::now();
            if let Some(timestamp_ms) = driver.next_timestamp() {
                app.update(timestamp_ms);
            }
            terminal.draw(|f| ui(f, &app))?;

            let timeout = tick_rate.saturating_sub(start.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(f: &mut Frame, app: &KinematicsApp) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(38)])
            .split(rows[1]);

        render_title(f, rows[0], app);
        render_stage(f, columns[0], app);
        render_panel(f, columns[1], app);
        render_status(f, rows[2], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &KinematicsApp) {
        let (label, color) = match (app.last_outcome, app.session.is_running()) {
            (StepOutcome::Stop, _) => ("[ENDED]", Color::Red),
            (_, true) => ("[RUNNING]", Color::Green),
            (_, false) => ("[PAUSED]", Color::Yellow),
        };
        let config = app.session.config();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " KINESIM ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} ", config.demo.name)),
            Span::raw("| "),
            Span::styled(label, Style::default().fg(color)),
            Span::raw(" | "),
            Span::raw(format!("t = {:.2}s", app.session.state().sim_time)),
            Span::raw(" | "),
            Span::styled(
                format!("{}x", app.session.clock().time_scale()),
                Style::default().fg(Color::Cyan),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title(
            "[Space] Run  [R] Restart  [↑↓] Field  [←→] Edit  [1-4] Demo  [Q] Quit",
        ));
        f.render_widget(title, area);
    }

    fn render_stage(f: &mut Frame, area: Rect, app: &KinematicsApp) {
        let viewport = *app.viewport();
        let frame = app.frame();

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title("Stage"))
            .x_bounds([0.0, viewport.width])
            .y_bounds([0.0, viewport.height])
            .paint(|ctx| {
                for command in frame {
                    paint(ctx, command, viewport.height);
                }
            });
        f.render_widget(canvas, area);
    }

    /// Paint one screen-space command; the canvas has Y up, the screen Y down.
    fn paint(ctx: &mut Context<'_>, command: &RenderCommand, height: f64) {
        let flip = |y: f64| height - y;
        match command {
            RenderCommand::Clear { .. } | RenderCommand::Present => {}
            RenderCommand::DrawAxes {
                origin_x,
                origin_y,
                width,
                height,
                color,
            } => {
                let c = to_color(*color);
                ctx.draw(&CanvasLine::new(0.0, flip(*origin_y), *width, flip(*origin_y), c));
                ctx.draw(&CanvasLine::new(*origin_x, 0.0, *origin_x, *height, c));
            }
            RenderCommand::DrawCircle {
                x,
                y,
                radius,
                color,
                filled,
            } => {
                let c = to_color(*color);
                if *filled {
                    ctx.draw(&Points {
                        coords: &[(*x, flip(*y))],
                        color: c,
                    });
                }
                ctx.draw(&Circle {
                    x: *x,
                    y: flip(*y),
                    radius: *radius,
                    color: c,
                });
            }
            RenderCommand::DrawArrow {
                x1,
                y1,
                x2,
                y2,
                color,
                dashed,
            } => segment(
                ctx,
                (*x1, flip(*y1)),
                (*x2, flip(*y2)),
                to_color(*color),
                *dashed,
            ),
            RenderCommand::DrawPath {
                points,
                color,
                dashed,
            } => {
                let c = to_color(*color);
                for pair in points.windows(2) {
                    segment(
                        ctx,
                        (pair[0].0, flip(pair[0].1)),
                        (pair[1].0, flip(pair[1].1)),
                        c,
                        *dashed,
                    );
                }
            }
        }
    }

    fn segment(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), color: Color, dashed: bool) {
        if !dashed {
            ctx.draw(&CanvasLine::new(from.0, from.1, to.0, to.1, color));
            return;
        }
        let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        for i in (0..DASHES).step_by(2) {
            let (a, b) = (
                lerp(i as f64 / DASHES as f64),
                lerp((i + 1) as f64 / DASHES as f64),
            );
            ctx.draw(&CanvasLine::new(a.0, a.1, b.0, b.1, color));
        }
    }

    const fn to_color(c: KColor) -> Color {
        Color::Rgb(c.r, c.g, c.b)
    }

    fn render_panel(f: &mut Frame, area: Rect, app: &KinematicsApp) {
        let items: Vec<ListItem> = app
            .panel
            .fields()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let value = match field.kind {
                    FieldKind::Action => "<enter>".to_string(),
                    _ => app.value_text(field.id),
                };
                let style = if i == app.focus_index() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![Span::styled(
                    format!("{:<26}{value:>8}", field.label),
                    style,
                )]))
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Panel"));
        f.render_widget(list, area);
    }

    fn render_status(f: &mut Frame, area: Rect, app: &KinematicsApp) {
        let state = app.session.state();
        let stats = app.session.stats();
        let mut spans = vec![
            Span::styled("Pos ", Style::default().fg(Color::Gray)),
            Span::raw(state.position.to_string()),
            Span::styled("  Vel ", Style::default().fg(Color::Gray)),
            Span::raw(state.velocity.to_string()),
            Span::styled("  Acc ", Style::default().fg(Color::Gray)),
            Span::raw(state.acceleration.to_string()),
            Span::styled("  Frames ", Style::default().fg(Color::Gray)),
            Span::raw(stats.frames.to_string()),
        ];
        if let Some(message) = &app.status {
            spans.push(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            ));
        }
        let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }
}
