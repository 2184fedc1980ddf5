//! Column-name contract for the lateral and raw tables.
//!
//! Header cells are matched byte-for-byte against these constants. The raw
//! filename header really does carry a leading `!` and embedded quotes; the
//! upstream export tool writes it that way, and cleaning it up would break
//! every file already in the field.

/// Latitude column, present in both input tables. Decimal degrees.
pub const GPS_LATITUDE: &str = "GPS latitude";

/// Longitude column, present in both input tables. Decimal degrees.
pub const GPS_LONGITUDE: &str = "GPS longitude";

/// Filename column in the raw table, exact physical header.
pub const RAW_FILENAME: &str = "!\"Filename\"";

/// Column appended to the lateral table on output. Unmatched rows keep an
/// empty cell here.
pub const MATCHED_FILENAME: &str = "Matched Filename";
