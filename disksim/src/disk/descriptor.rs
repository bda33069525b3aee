//! Parsers for the comma-separated descriptors the harness passes in.
//!
//! All parsers accept surrounding whitespace and reject trailing input.

use nom::character::complete::{char, i64 as integer, multispace0, u64 as unsigned};
use nom::combinator::{all_consuming, map, opt};
use nom::multi::separated_list0;
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use crate::disk::disk_error::DiskError;

/// An address list: explicit addresses, or `-1` for "generate from the descriptor".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressList {
    Generate,
    Explicit(Vec<i64>),
}

/// One late address, optionally pinned to the tick it arrives at (`addr@tick`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LateEntry {
    pub address: i64,
    pub tick: Option<u64>,
}

/// A late address list: explicit entries, or `-1` for "generate from the descriptor".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LateList {
    Generate,
    Explicit(Vec<LateEntry>),
}

/// `num,max,min`: draw `num` addresses uniformly from `[min, max]`. A `max` of `-1` stands for
/// the last block of the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDescriptor {
    pub count: usize,
    pub max: i64,
    pub min: i64,
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn integers(input: &str) -> IResult<&str, Vec<i64>> {
    delimited(multispace0, separated_list0(comma, integer), multispace0)(input)
}

fn reals(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(multispace0, separated_list0(comma, double), multispace0)(input)
}

fn late_entry(input: &str) -> IResult<&str, LateEntry> {
    map(
        pair(integer, opt(preceded(char('@'), unsigned))),
        |(address, tick)| LateEntry { address, tick },
    )(input)
}

fn late_entries(input: &str) -> IResult<&str, Vec<LateEntry>> {
    delimited(multispace0, separated_list0(comma, late_entry), multispace0)(input)
}

/// Runs `parser` over the whole of `input`, mapping failures to [`DiskError::Descriptor`].
fn parse_all<'a, T>(
    field: &'static str,
    input: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Result<T, DiskError> {
    all_consuming(parser)(input)
        .map(|(_, value)| value)
        .map_err(|err| {
            let reason = match err {
                nom::Err::Error(e) | nom::Err::Failure(e) if e.input.is_empty() => {
                    String::from("unexpected end of input")
                }
                nom::Err::Error(e) | nom::Err::Failure(e) => {
                    format!("unexpected {:?}", e.input)
                }
                nom::Err::Incomplete(_) => String::from("incomplete input"),
            };
            DiskError::Descriptor {
                field,
                input: String::from(input),
                reason,
            }
        })
}

pub fn parse_integers(field: &'static str, input: &str) -> Result<Vec<i64>, DiskError> {
    parse_all(field, input, integers)
}

pub fn parse_reals(field: &'static str, input: &str) -> Result<Vec<f64>, DiskError> {
    parse_all(field, input, reals)
}

pub fn parse_address_list(input: &str) -> Result<AddressList, DiskError> {
    let addresses = parse_integers("address", input)?;
    if addresses == [-1] {
        Ok(AddressList::Generate)
    } else {
        Ok(AddressList::Explicit(addresses))
    }
}

pub fn parse_late_list(input: &str) -> Result<LateList, DiskError> {
    let entries = parse_all("late address", input, late_entries)?;
    if let [LateEntry {
        address: -1,
        tick: None,
    }] = entries.as_slice()
    {
        Ok(LateList::Generate)
    } else {
        Ok(LateList::Explicit(entries))
    }
}

/// Sector widths in degrees, one per track.
pub fn parse_zoning(input: &str) -> Result<Vec<f64>, DiskError> {
    parse_reals("zoning", input)
}

impl RandomDescriptor {
    pub fn parse(field: &'static str, input: &str) -> Result<Self, DiskError> {
        let malformed = |reason: &str| DiskError::Descriptor {
            field,
            input: String::from(input),
            reason: String::from(reason),
        };

        match parse_integers(field, input)?.as_slice() {
            &[count, max, min] => Ok(RandomDescriptor {
                count: usize::try_from(count)
                    .map_err(|_| malformed("request count must not be negative"))?,
                max,
                min,
            }),
            _ => Err(malformed("expected num,max,min")),
        }
    }
}
