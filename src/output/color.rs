use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Progress output for a run. Writes straight through so that progress
/// shows up while the run is still going.
pub struct ColorWriter<W: WriteColor = StandardStream> {
    out: W,
}

impl ColorWriter<StandardStream> {
    pub fn stdout(no_color: bool) -> Self {
        let colors_enabled = !no_color && std::env::var("NO_COLOR").is_err();
        let choice = if colors_enabled {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ColorWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn with_spec(&mut self, spec: &ColorSpec, text: &str, newline: bool) -> io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{}", text)?;
        self.out.reset()?;
        if newline {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    /// Print text in a specific color
    pub fn print_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color));
        self.with_spec(&spec, text, false)
    }

    /// Print a header (bold + color)
    pub fn print_header(&mut self, text: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan)).set_bold(true);
        self.with_spec(&spec, text, true)
    }

    /// Print a label: value pair
    pub fn print_field(&mut self, label: &str, value: &str) -> io::Result<()> {
        self.print_colored(label, Color::Blue)?;
        writeln!(self.out, ":{}", value)?;
        self.out.flush()
    }

    /// Print a notice about the run mode
    pub fn print_notice(&mut self, text: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        self.with_spec(&spec, text, true)
    }

    /// Print one list item, `- text`
    pub fn print_item(&mut self, text: &str) -> io::Result<()> {
        self.print_colored("- ", Color::Green)?;
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Write a full line of plain text
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}
