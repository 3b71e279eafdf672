use clap::{self, Arg, Command};

const DEFAULT_BACKGROUND: &str = "BG";
const DEFAULT_REFERENCE: &str = "Exp";

fn add_output(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("output")
            .long("output")
            .short('o')
            .help("Write the figure to this file")
            .long_help(
                "Write the figure to this file.  The format is chosen from the extension: \
                 svg, png, bmp, jpg or jpeg",
            )
            .required(true)
            .takes_value(true),
    )
}

fn add_transforms(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("names")
            .long("names")
            .short('n')
            .help("Rename columns by position (comma separated, empty keeps the name)")
            .takes_value(true),
    )
    .arg(
        Arg::new("rename")
            .long("rename")
            .short('r')
            .help("Rename a column, as OLD=NEW")
            .takes_value(true)
            .multiple_occurrences(true),
    )
    .arg(
        Arg::new("subtract-bg")
            .long("subtract-bg")
            .short('b')
            .help("Subtract the background column from every column")
            .long_help(
                "Subtract the background column from every column.  Use \
                 --subtract-bg=NAME when the background column was renamed",
            )
            .takes_value(true)
            .require_equals(true)
            .min_values(0)
            .default_missing_value(DEFAULT_BACKGROUND),
    )
    .arg(
        Arg::new("normalize")
            .long("normalize")
            .short('N')
            .help("Scale every column so that the reference column spans from 0 to 1")
            .long_help(
                "Scale every column so that the reference column spans from 0 to 1.  The \
                 experimental data is the reference unless --normalize=REF is used",
            )
            .takes_value(true)
            .require_equals(true)
            .min_values(0)
            .default_missing_value(DEFAULT_REFERENCE),
    )
}

fn add_style(cmd: Command<'static>) -> Command<'static> {
    cmd.arg(
        Arg::new("columns")
            .long("columns")
            .short('C')
            .help("Draw only these columns (comma separated)")
            .takes_value(true),
    )
    .arg(
        Arg::new("fill")
            .long("fill")
            .short('f')
            .help("Fill components down to the background"),
    )
    .arg(Arg::new("no-legend").long("no-legend").help("Do not draw the legend"))
    .arg(
        Arg::new("no-filename")
            .long("no-filename")
            .help("Do not use the file name as y label"),
    )
    .arg(Arg::new("frame").long("frame").help("Draw a frame around panels"))
    .arg(
        Arg::new("ylabel")
            .long("ylabel")
            .short('y')
            .help("Use this text as y label")
            .takes_value(true),
    )
    .arg(
        Arg::new("colors")
            .long("colors")
            .help("Palette to use (comma separated names or hex codes)")
            .long_help(
                "Palette to use, as comma separated CSS color names or hex codes.  The first \
                 color is used for experimental data and envelope, the others cycle over \
                 the remaining columns",
            )
            .takes_value(true),
    )
    .arg(
        Arg::new("size")
            .long("size")
            .short('s')
            .help("Size of the figure in pixels, as WIDTHxHEIGHT")
            .default_value("1200x800")
            .takes_value(true),
    )
    .arg(
        Arg::new("alpha")
            .long("alpha")
            .short('a')
            .help("Opacity of filled regions")
            .default_value("0.5")
            .takes_value(true),
    )
}

pub fn get_app() -> Command<'static> {
    let info = Command::new("info")
        .about("Print a summary of CasaXPS reports")
        .arg(
            Arg::new("input")
                .help("Input files")
                .long_help("Input files.  A single dash reads standard input")
                .required(true)
                .multiple_values(true),
        );

    let mut plot = Command::new("plot")
        .about("Plot a CasaXPS report")
        .arg(
            Arg::new("input")
                .help("Input file")
                .default_value("-")
                .long_help("If not present or a single dash, standard input will be used"),
        );
    plot = add_style(add_transforms(add_output(plot)));

    let mut stack = Command::new("stack")
        .about("Plot several CasaXPS reports stacked in one figure, first one on top")
        .arg(
            Arg::new("input")
                .help("Input files")
                .required(true)
                .multiple_values(true),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .short('t')
                .help("Title of the figure (defaults to the title of the first report)")
                .takes_value(true),
        )
        .arg(
            Arg::new("pos")
                .long("pos")
                .short('p')
                .help("Draw a labelled vertical line at this energy")
                .takes_value(true)
                .multiple_occurrences(true),
        );
    stack = add_style(add_transforms(add_output(stack)));

    Command::new("xpsplot")
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .max_term_width(100)
        .subcommand_required(true)
        .arg(
            Arg::new("color")
                .short('c')
                .long("color")
                .help("Use colors in the output")
                .possible_values(["auto", "no", "yes"])
                .default_value("auto")
                .takes_value(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Be more verbose")
                .takes_value(false),
        )
        .subcommand(info)
        .subcommand(plot)
        .subcommand(stack)
}
