use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lvmviz::app::App;
use lvmviz::chart::{self, html, svg, ChartData, ChartOptions, PvOrder, SegmentOrder};
use lvmviz::collectors::pvdisplay::parse_pvdisplay;
use lvmviz::collectors::source::InputSource;
use lvmviz::config::Config;
use lvmviz::error::{self, SourceError};
use lvmviz::ui::theme::ThemeVariant;
use lvmviz::util::palette::ColorMap;
use lvmviz::util::summary::Summary;
use lvmviz::util::{report, snapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "lvmviz", about = "LVM segment allocation visualizer", version)]
struct Cli {
    /// Saved output of `pvdisplay -m --units M` (omit to query the live system)
    file: Option<PathBuf>,

    /// Use built-in sample data instead of a file or the live system
    #[arg(long, conflicts_with = "file")]
    sample: bool,

    /// Write an interactive HTML page instead of an SVG image
    #[arg(long)]
    html: bool,

    /// Print the summary only, write no chart
    #[arg(long, conflicts_with = "html")]
    no_chart: bool,

    /// Print a JSON snapshot of the parsed allocation and exit
    #[arg(long)]
    json: bool,

    /// Browse the charts in an interactive terminal view
    #[arg(long, conflicts_with = "json")]
    tui: bool,

    /// Chart output path (default: lvm_segments_<source>.svg|html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Segment order along each timeline row
    #[arg(long, value_enum)]
    segment_order: Option<SegmentOrder>,

    /// PV order of the timeline rows
    #[arg(long, value_enum)]
    pv_order: Option<PvOrder>,

    /// Run pvdisplay without sudo
    #[arg(long)]
    no_sudo: bool,

    /// Color theme for --tui: default, dracula, gruvbox, nord
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "lvmviz", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let mut cfg = Config::load();
    if cli.config {
        run_print_config(&cfg);
        return ExitCode::SUCCESS;
    }

    if cli.no_sudo { cfg.pvdisplay.use_sudo = false; }
    if let Some(order) = cli.segment_order { cfg.charts.segment_order = order; }
    if let Some(order) = cli.pv_order { cfg.charts.timeline_pv_order = order; }
    if let Some(theme) = &cli.theme { cfg.general.theme = theme.clone(); }

    let source = match (&cli.file, cli.sample) {
        (Some(path), _) => InputSource::File(path.clone()),
        (None, true)    => InputSource::Sample,
        (None, false)   => InputSource::Live,
    };

    match run(&cli, &cfg, &source) {
        Ok(())  => ExitCode::SUCCESS,
        Err(e)  => report_error(&e),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli, cfg: &Config, source: &InputSource) -> Result<()> {
    log::info!("reading pvdisplay output from {}", source.label());
    let text  = source.read(&cfg.pvdisplay)?;
    let model = parse_pvdisplay(&text);
    if model.is_empty() {
        log::warn!("no physical volumes found in {}", source.label());
    }

    let colors = ColorMap::from_config(&model, &cfg.charts);
    let opts   = ChartOptions::from_config(&cfg.charts);

    if cli.json {
        let summary = Summary::from_model(&model);
        let doc = snapshot::build(&model, &summary, &colors, &source.label());
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if cli.tui {
        let theme = ThemeVariant::from_name(&cfg.general.theme);
        return run_tui(App::new(model, colors, opts, theme, source.label()));
    }

    let summary = Summary::from_model(&model);
    print!("{}", report::generate(&summary, &source.label()));

    if cli.no_chart {
        return Ok(());
    }

    let chart = ChartData::build(&model, &colors, &opts);
    let ext   = if cli.html { "html" } else { "svg" };
    let path  = cli.output.clone().unwrap_or_else(|| {
        chart::artifact_path(&cfg.general.output_dir, &source.artifact_stem(), ext)
    });

    if cli.html {
        html::write(&chart, &path)?;
        println!("\nHTML visualization saved: {}", path.display());
        println!("Open the HTML file in your browser to view the interactive charts");
    } else {
        svg::write(&chart, &path)?;
        println!("\nChart saved: {}", path.display());
    }
    Ok(())
}

/// Print a failure the way the user can act on it and pick the exit code.
fn report_error(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<SourceError>() {
        Some(e) => {
            eprintln!("✗ {}", e);
            eprintln!("  {}", e.hint());
        }
        None => {
            eprintln!("✗ Analysis error: {}", err);
            eprintln!("{:?}", err);
        }
    }
    ExitCode::from(error::exit_code(err))
}

fn run_print_config(cfg: &Config) {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let c = &cfg.charts;
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  theme      = {}", cfg.general.theme);
    let out_dir = if cfg.general.output_dir.is_empty() { "(current directory)" } else { cfg.general.output_dir.as_str() };
    println!("  output_dir = {}", out_dir);
    println!();
    println!("[pvdisplay]");
    println!("  command  = {}", cfg.pvdisplay.command);
    println!("  args     = {:?}", cfg.pvdisplay.args);
    println!("  use_sudo = {}", cfg.pvdisplay.use_sudo);
    println!();
    println!("[charts]");
    if c.palette.is_empty() {
        println!("  palette           = (built-in, 15 colors)");
    } else {
        println!("  palette           = {:?}", c.palette);
    }
    println!("  free_color        = {}", c.free_color);
    println!("  segment_order     = {:?}", c.segment_order);
    println!("  timeline_pv_order = {:?}", c.timeline_pv_order);
    println!("  label_min_gb      = {}", c.label_min_gb);
}

fn run_tui(mut app: App) -> Result<()> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let result = app.run(&mut term);
    restore_terminal()?;
    result
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
