//! Decoding of the time and date values of FAT directory entries.
//!
//! Values are given as they appear in a hex dump, so the two bytes of the little-endian
//! on-disk value come in reverse order and are swapped before decoding.
//!
//! - date: bits 0-4 day, bits 5-8 month, bits 9-15 years since 1980
//! - time: bits 0-4 seconds / 2, bits 5-10 minutes, bits 11-15 hours

use getset::Getters;
use std::fmt;
use std::fs;
use std::path::Path;

use super::conversion_error::ConversionError;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A decoded FAT date. Built by [`FatDate::decode`] only, so `month` is always 1 to 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct FatDate {
    #[get = "pub"]
    year: u16,
    #[get = "pub"]
    month: u8,
    #[get = "pub"]
    day: u8,
}

impl FatDate {
    /// Decodes a date value whose bytes are already in logical order.
    ///
    /// # Errors
    /// - `ConversionError::InvalidMonth` if the month is not between 1 and 12
    pub fn decode(value: u16) -> Result<Self, ConversionError> {
        let month = ((value >> 5) & 0x0F) as u8;
        if !(1..=12).contains(&month) {
            return Err(ConversionError::InvalidMonth(value));
        }

        Ok(FatDate {
            year: ((value >> 9) & 0x7F) + 1980,
            month,
            day: (value & 0x1F) as u8,
        })
    }
}

impl fmt::Display for FatDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {} {}, {}",
            MONTHS[usize::from(self.month - 1)],
            self.day,
            self.year
        )
    }
}

/// A decoded FAT time, with a two-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct FatTime {
    #[get = "pub"]
    hours: u8,
    #[get = "pub"]
    minutes: u8,
    #[get = "pub"]
    seconds: u8,
}

impl FatTime {
    /// Decodes a time value whose bytes are already in logical order.
    pub fn decode(value: u16) -> Self {
        FatTime {
            hours: ((value >> 11) & 0x1F) as u8,
            minutes: ((value >> 5) & 0x3F) as u8,
            seconds: ((value & 0x1F) * 2) as u8,
        }
    }
}

/// Renders the time on a 12-hour clock.
impl fmt::Display for FatTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.hours >= 12 { "PM" } else { "AM" };
        let hours = match self.hours % 12 {
            0 => 12,
            h => h,
        };
        write!(
            f,
            "Time: {}:{:02}:{:02} {}",
            hours, self.minutes, self.seconds, suffix
        )
    }
}

/// Parses a 16-bit hex value such as `0x1234` and swaps its bytes.
///
/// # Errors
/// - `ConversionError::InvalidHex` if `input` is not a hex number of at most 16 bits
pub fn parse_hex_value(input: &str) -> Result<u16, ConversionError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    u16::from_str_radix(digits, 16)
        .map(u16::swap_bytes)
        .map_err(|_| ConversionError::InvalidHex(trimmed.to_string()))
}

/// Reads a hex value from the file at `path`.
pub fn read_hex_file(path: &Path) -> Result<u16, ConversionError> {
    let content = fs::read_to_string(path)?;
    parse_hex_value(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn decodes_dates() {
        let value = parse_hex_value("0x6F30").unwrap();
        assert_eq!(value, 0x306F);
        let date = FatDate::decode(value).unwrap();
        assert_eq!((*date.year(), *date.month(), *date.day()), (2004, 3, 15));
        assert_eq!(date.to_string(), "Date: Mar 15, 2004");
    }

    #[test]
    fn rejects_invalid_months() {
        assert!(matches!(
            FatDate::decode(0x000F),
            Err(ConversionError::InvalidMonth(0x000F))
        ));
        assert!(matches!(
            FatDate::decode(13 << 5),
            Err(ConversionError::InvalidMonth(_))
        ));
    }

    #[test]
    fn decodes_times_on_a_12_hour_clock() {
        let time = FatTime::decode(parse_hex_value("0x6A74").unwrap());
        assert_eq!(time.to_string(), "Time: 2:35:20 PM");

        let time = FatTime::decode(parse_hex_value("0xA400").unwrap());
        assert_eq!(time.to_string(), "Time: 12:05:08 AM");

        assert_eq!(FatTime::decode(12 << 11).to_string(), "Time: 12:00:00 PM");
    }

    #[test]
    fn every_decoded_date_can_be_displayed() {
        for value in 0..=u16::MAX {
            if let Ok(date) = FatDate::decode(value) {
                assert!((1..=12).contains(date.month()));
                assert!(date.to_string().starts_with("Date: "));
            }
        }
    }

    #[test]
    fn rejects_malformed_hex() {
        for input in ["", "0x", "0xZZ", "0x123456"] {
            assert!(matches!(
                parse_hex_value(input),
                Err(ConversionError::InvalidHex(_))
            ));
        }
    }

    #[test]
    fn reads_values_from_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0x6F30").unwrap();
        assert_eq!(read_hex_file(file.path()).unwrap(), 0x306F);
    }
}
