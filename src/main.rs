use std::env;
use std::process;

use clap::ArgMatches;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use yansi::Paint;

use xpsplot::plot::{
    Palette, PanelOptions, PanelOptionsBuilder, PlotStyle, PlotStyleBuilder, StackOptions,
    StackOptionsBuilder,
};
use xpsplot::{Result, XpsData, XpsError, XpsStack};

#[macro_use]
extern crate log;

mod app;

/// Transformations the command line can apply to one report or to a stack of
/// them.
trait Spectra {
    fn rename_column(&mut self, old: &str, new: &str) -> Result<()>;
    fn rename_all(&mut self, names: &[String]) -> Result<()>;
    fn subtract_background(&mut self, background: &str) -> Result<()>;
    fn normalize(&mut self, reference: &str) -> Result<()>;
}

impl Spectra for XpsData {
    fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        XpsData::rename_column(self, old, new)
    }
    fn rename_all(&mut self, names: &[String]) -> Result<()> {
        XpsData::rename_all(self, names)
    }
    fn subtract_background(&mut self, background: &str) -> Result<()> {
        XpsData::subtract_background(self, background)
    }
    fn normalize(&mut self, reference: &str) -> Result<()> {
        XpsData::normalize(self, reference)
    }
}

impl Spectra for XpsStack {
    fn rename_column(&mut self, old: &str, new: &str) -> Result<()> {
        XpsStack::rename_column(self, old, new)
    }
    fn rename_all(&mut self, names: &[String]) -> Result<()> {
        XpsStack::rename_all(self, names)
    }
    fn subtract_background(&mut self, background: &str) -> Result<()> {
        XpsStack::subtract_background(self, background)
    }
    fn normalize(&mut self, reference: &str) -> Result<()> {
        XpsStack::normalize(self, reference)
    }
}

fn disable_color_if_needed(option: &str) -> ColorChoice {
    match option {
        "no" => {
            Paint::disable();
            ColorChoice::Never
        }
        "auto" => match env::var("TERM") {
            Ok(value) if value == "dumb" => {
                Paint::disable();
                ColorChoice::Never
            }
            _ => {
                if !atty::is(atty::Stream::Stdout) {
                    Paint::disable();
                }
                ColorChoice::Auto
            }
        },
        _ => ColorChoice::Always,
    }
}

fn configure_logger(verbose: bool, color: ColorChoice) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = TermLogger::init(level, config, TerminalMode::Stderr, color) {
        eprintln!("Cannot set up logging: {}", error);
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(|s| s.trim().to_owned()).collect()
}

fn parse_value<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>> {
    match matches.value_of(name) {
        Some(text) => text.trim().parse::<T>().map(Some).map_err(|_| {
            XpsError::InvalidOptions(format!("cannot parse '{}' given to --{}", text, name))
        }),
        None => Ok(None),
    }
}

fn parse_size(text: &str) -> Result<(u32, u32)> {
    let invalid = || XpsError::InvalidOptions(format!("size '{}' is not WIDTHxHEIGHT", text));
    let (width, height) = text.split_once(|c| c == 'x' || c == 'X').ok_or_else(invalid)?;
    match (width.trim().parse::<u32>(), height.trim().parse::<u32>()) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Ok((width, height)),
        _ => Err(invalid()),
    }
}

fn get_style(matches: &ArgMatches) -> Result<PlotStyle> {
    let mut builder = PlotStyleBuilder::default();
    if let Some(size) = matches.value_of("size") {
        builder.size(parse_size(size)?);
    }
    if let Some(alpha) = parse_value::<f64>(matches, "alpha")? {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(XpsError::InvalidOptions(format!(
                "alpha should be between 0 and 1, got {}",
                alpha
            )));
        }
        builder.alpha(alpha);
    }
    if let Some(colors) = matches.value_of("colors") {
        builder.palette(Palette::parse(&split_list(colors))?);
    }
    builder
        .build()
        .map_err(|e| XpsError::InvalidOptions(e.to_string()))
}

fn get_panel_options(matches: &ArgMatches) -> Result<PanelOptions> {
    let mut builder = PanelOptionsBuilder::default();
    builder
        .fill(matches.is_present("fill"))
        .legend(!matches.is_present("no-legend"))
        .filename_label(!matches.is_present("no-filename"))
        .frame(matches.is_present("frame"))
        .style(get_style(matches)?);
    if let Some(columns) = matches.value_of("columns") {
        builder.columns(split_list(columns));
    }
    if let Some(ylabel) = matches.value_of("ylabel") {
        builder.ylabel(ylabel);
    }
    builder
        .build()
        .map_err(|e| XpsError::InvalidOptions(e.to_string()))
}

fn get_stack_options(matches: &ArgMatches) -> Result<StackOptions> {
    let mut builder = StackOptionsBuilder::default();
    builder
        .fill(matches.is_present("fill"))
        .legend(!matches.is_present("no-legend"))
        .filename_label(!matches.is_present("no-filename"))
        .frame(matches.is_present("frame"))
        .style(get_style(matches)?);
    if let Some(columns) = matches.value_of("columns") {
        builder.columns(split_list(columns));
    }
    if let Some(ylabel) = matches.value_of("ylabel") {
        builder.ylabel(ylabel);
    }
    if let Some(values) = matches.values_of("pos") {
        let positions = values
            .map(|v| {
                v.trim().parse::<f64>().map_err(|_| {
                    XpsError::InvalidOptions(format!("cannot parse '{}' given to --pos", v))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        builder.positions(positions);
    }
    builder
        .build()
        .map_err(|e| XpsError::InvalidOptions(e.to_string()))
}

/// Applies renames, background subtraction and normalization, in that order.
fn transform<S: Spectra>(spectra: &mut S, matches: &ArgMatches) -> Result<()> {
    if let Some(names) = matches.value_of("names") {
        spectra.rename_all(&split_list(names))?;
    }
    if let Some(renames) = matches.values_of("rename") {
        for rename in renames {
            let (old, new) = rename.split_once('=').ok_or_else(|| {
                XpsError::InvalidOptions(format!("rename '{}' is not OLD=NEW", rename))
            })?;
            spectra.rename_column(old.trim(), new.trim())?;
        }
    }
    if let Some(background) = matches.value_of("subtract-bg") {
        spectra.subtract_background(background)?;
    }
    if let Some(reference) = matches.value_of("normalize") {
        spectra.normalize(reference)?;
    }
    Ok(())
}

fn info(matches: &ArgMatches) -> Result<()> {
    if let Some(inputs) = matches.values_of("input") {
        for (i, input) in inputs.enumerate() {
            let data = XpsData::from_file(input)?;
            if i > 0 {
                println!();
            }
            println!("{}", data);
        }
    }
    Ok(())
}

fn plot(matches: &ArgMatches) -> Result<()> {
    let options = get_panel_options(matches)?;
    let input = matches.value_of("input").unwrap_or("-");
    let mut data = XpsData::from_file(input)?;
    transform(&mut data, matches)?;
    let output = matches.value_of("output").unwrap_or_default();
    data.save(output, &options)
}

fn stack(matches: &ArgMatches) -> Result<()> {
    let options = get_stack_options(matches)?;
    let inputs: Vec<&str> = matches
        .values_of("input")
        .map(|v| v.collect())
        .unwrap_or_default();
    let mut stack = XpsStack::from_files(&inputs)?;
    if let Some(title) = matches.value_of("title") {
        stack.title = title.to_owned();
    }
    transform(&mut stack, matches)?;
    let output = matches.value_of("output").unwrap_or_default();
    stack.save(output, &options)
}

fn main() {
    let matches = app::get_app().get_matches();
    let verbose = matches.is_present("verbose");
    let color = disable_color_if_needed(matches.value_of("color").unwrap_or("auto"));
    configure_logger(verbose, color);
    let result = match matches.subcommand() {
        Some(("info", subcommand_matches)) => info(subcommand_matches),
        Some(("plot", subcommand_matches)) => plot(subcommand_matches),
        Some(("stack", subcommand_matches)) => stack(subcommand_matches),
        _ => unreachable!("Invalid subcommand"),
    };
    if let Err(error) = result {
        error!("{}", error);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_size(" 10 X 20 ").unwrap(), (10, 20));
        assert!(matches!(parse_size("800"), Err(XpsError::InvalidOptions(_))));
        assert!(matches!(parse_size("0x600"), Err(XpsError::InvalidOptions(_))));
        assert!(matches!(parse_size("ax600"), Err(XpsError::InvalidOptions(_))));
    }

    #[test]
    fn list_splitting() {
        assert_eq!(split_list("Exp, carb,,envelope"), vec!["Exp", "carb", "", "envelope"]);
    }

    #[test]
    fn options_from_command_line() {
        let m = app::get_app().get_matches_from(vec![
            "xpsplot", "stack", "a", "b", "-o", "s.svg", "--fill", "--no-legend", "--size",
            "600x400", "--colors", "black,#cc0000", "--pos", "284.8", "--ylabel", "counts",
        ]);
        let sub_m = m.subcommand_matches("stack").unwrap();
        let options = get_stack_options(sub_m).unwrap();
        assert!(options.fill);
        assert!(!options.legend);
        assert!(options.filename_label);
        assert_eq!(options.ylabel.as_deref(), Some("counts"));
        assert_eq!(options.positions, vec![284.8]);
        assert_eq!(options.style.size, (600, 400));
        assert_eq!(options.style.palette.colors().len(), 2);
    }

    #[test]
    fn invalid_options() {
        let m = app::get_app().get_matches_from(vec![
            "xpsplot", "plot", "a", "-o", "a.svg", "--alpha", "1.5",
        ]);
        let sub_m = m.subcommand_matches("plot").unwrap();
        assert!(matches!(
            get_panel_options(sub_m),
            Err(XpsError::InvalidOptions(_))
        ));

        let m = app::get_app().get_matches_from(vec![
            "xpsplot", "plot", "a", "-o", "a.svg", "--colors", "black,notacolor",
        ]);
        let sub_m = m.subcommand_matches("plot").unwrap();
        assert!(matches!(
            get_panel_options(sub_m),
            Err(XpsError::InvalidColor(_))
        ));
    }
}
