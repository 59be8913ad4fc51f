use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};

use rangetable_core::{
    Configuration, Range, RangeTableBuilder, ValueRange,
    core::ascii::{CharClass, ascii_declarations, ascii_table},
};

#[derive(Parser, Debug)]
#[command(name = "rangetable", version, about = "Builds a range table from prioritized ranges and queries it")]
struct Args {
    /// Declared range `BEGIN..END=VALUE` or `BEGIN..=END=VALUE`; later declarations win.
    /// Endpoints are single characters or `U+XXXX` code points (repeatable).
    #[arg(long = "range", short = 'r', value_name = "RANGE", value_parser = parse_declaration)]
    ranges: Vec<ValueRange<char, String>>,

    /// Value for characters outside every declared range (default: none)
    #[arg(long, value_name = "VALUE", default_value = "none")]
    default: String,

    /// Text whose characters are looked up (repeatable)
    #[arg(long = "query", short = 'q', value_name = "TEXT")]
    queries: Vec<String>,

    /// Merge neighbouring entries with equal values (default: false)
    #[arg(long, value_name = "BOOL")]
    coalesce: Option<bool>,

    /// Print every table entry
    #[arg(long)]
    dump: bool,

    /// Logging level off, error, warn, info, debug, trace (default: warn)
    #[arg(long = "log-level", alias = "log_level", value_name = "LEVEL")]
    log_level: Option<LevelFilter>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new().filter_level(level).init();

    let config = Configuration {
        coalesce: args.coalesce,
        log_entries: Some(level >= LevelFilter::Debug),
    };

    if args.ranges.is_empty() {
        info!("No ranges declared, using the built-in ASCII classification table");
        run_ascii(&args, &config)
    } else {
        run_declared(args, config)
    }
}

fn run_declared(args: Args, config: Configuration) -> ExitCode {
    let declared_count = args.ranges.len();
    let table = match RangeTableBuilder::new(args.default)
        .configuration(config)
        .ranges(args.ranges)
        .build()
    {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to build table from {} ranges: {}", declared_count, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Table has {} entries", table.len());

    if args.dump {
        for (range, value) in table.spans() {
            println!("{} => {}", describe_range(&range), value);
        }
    }

    for text in &args.queries {
        for c in text.chars() {
            println!("{} => {}", describe_char(c), table.lookup(c));
        }
    }

    ExitCode::SUCCESS
}

fn run_ascii(args: &Args, config: &Configuration) -> ExitCode {
    if args.dump {
        // The shared table is always plain; rebuild when coalescing is asked for.
        if config.coalesce() {
            match RangeTableBuilder::new(CharClass::EXTENDED)
                .configuration(config.clone())
                .ranges(ascii_declarations())
                .build()
            {
                Ok(table) => {
                    for (range, value) in table.spans() {
                        println!("{:?} => {:?}", range, value);
                    }
                }
                Err(e) => {
                    error!("Failed to build the ASCII table: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            for (range, value) in ascii_table().spans() {
                println!("{:?} => {:?}", range, value);
            }
        }
    }

    for text in &args.queries {
        for byte in text.bytes() {
            println!("{} => {:?}", describe_char(byte as char), ascii_table().lookup(byte));
        }
    }

    ExitCode::SUCCESS
}

fn describe_char(c: char) -> String {
    if c.is_ascii_graphic() {
        format!("'{}'", c)
    } else {
        format!("U+{:04X}", c as u32)
    }
}

fn describe_range(range: &Range<char>) -> String {
    let close = if range.include_end { "]" } else { ")" };
    format!("[{}, {}{}", describe_char(range.begin), describe_char(range.end), close)
}

/// Parses `BEGIN..END=VALUE` (exclusive) or `BEGIN..=END=VALUE` (inclusive).
fn parse_declaration(declaration: &str) -> Result<ValueRange<char, String>, String> {
    let (begin, rest) = parse_endpoint(declaration)?;
    let rest = rest
        .strip_prefix("..")
        .ok_or_else(|| format!("expected `..` after the range start in `{}`", declaration))?;

    let (include_end, rest) = match rest.strip_prefix('=') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };

    let (end, rest) = parse_endpoint(rest)?;
    let value = rest
        .strip_prefix('=')
        .ok_or_else(|| format!("expected `=VALUE` after the range end in `{}`", declaration))?;

    if value.is_empty() {
        return Err(format!("missing value in `{}`", declaration));
    }

    Ok(ValueRange::new(Range::new(begin, end, include_end), value.to_string()))
}

/// A single character, or `U+` followed by hex digits.
fn parse_endpoint(input: &str) -> Result<(char, &str), String> {
    if let Some(hex) = input.strip_prefix("U+") {
        let digits = hex.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(hex.len());
        let code = u32::from_str_radix(&hex[..digits], 16)
            .map_err(|e| format!("invalid code point `U+{}`: {}", &hex[..digits], e))?;
        let c = char::from_u32(code).ok_or_else(|| format!("U+{:X} is not a scalar value", code))?;
        return Ok((c, &hex[digits..]));
    }

    let mut chars = input.chars();
    let c = chars
        .next()
        .ok_or_else(|| "expected a range endpoint".to_string())?;
    Ok((c, chars.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inclusive_and_exclusive_declarations() {
        let d = parse_declaration("a..=z=letter").unwrap();
        assert_eq!(d.range, Range::inclusive('a', 'z'));
        assert_eq!(d.value, "letter");

        let d = parse_declaration("0..:=digit").unwrap();
        assert_eq!(d.range, Range::exclusive('0', ':'));
        assert_eq!(d.value, "digit");
    }

    #[test]
    fn parses_code_points_and_punctuation_endpoints() {
        let d = parse_declaration("U+0..=U+1F=control").unwrap();
        assert_eq!(d.range, Range::inclusive('\0', '\u{1F}'));

        let d = parse_declaration("...=/=punct").unwrap();
        assert_eq!(d.range, Range::inclusive('.', '/'));
        assert_eq!(d.value, "punct");
    }

    #[test]
    fn rejects_malformed_declarations() {
        assert!(parse_declaration("a-z=letter").is_err());
        assert!(parse_declaration("a..=z").is_err());
        assert!(parse_declaration("a..=z=").is_err());
        assert!(parse_declaration("U+D800..=U+D8FF=x").is_err());
        assert!(parse_declaration("").is_err());
    }
}
