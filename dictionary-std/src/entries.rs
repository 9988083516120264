//! The declarative entry tables of the standard dictionaries.
//!
//! One record per local tag, carrying the display names, units and wire
//! conversion of the element. The conversions follow the published
//! ST 0601.11+ tables; nested sets with no profiled conversion (RVT, VMTI)
//! stay opaque byte blobs.

use klv_core::dictionary::{Descriptors, EnumSymbols, TagEntry, ValueKind};
use klv_core::value::TextEncoding;
use klv_core::Tag;

use crate::SECURITY_LOCAL_SET;

// integer lattice domains of the ST 0601 §8 conversions;
// signed domains are symmetric, leaving the most-negative
// integer as the error indicator
const UINT8: (i64, i64) = (0, 0xFF);
const UINT16: (i64, i64) = (0, 0xFFFF);
const UINT32: (i64, i64) = (0, 0xFFFF_FFFF);
const SINT16: (i64, i64) = (-0x7FFF, 0x7FFF);
const SINT32: (i64, i64) = (-0x7FFF_FFFF, 0x7FFF_FFFF);

const DEGREES: Option<&str> = Some("degrees");
const METERS: Option<&str> = Some("meters");
const METERS_PER_SECOND: Option<&str> = Some("meters/second");
const MILLIBAR: Option<&str> = Some("millibar");

/// A UAS Datalink Local Set entry, with its reporting descriptors.
const fn uas(
    tag: u8,
    name: &'static str,
    esd_name: &'static str,
    uds_name: &'static str,
    units: Option<&'static str>,
    kind: ValueKind,
) -> TagEntry {
    TagEntry {
        tag: Tag(tag),
        name,
        descriptors: Some(Descriptors { esd_name, uds_name }),
        units,
        kind,
    }
}

/// A Security Local Set entry; ST 0102 declares no ESD/UDS descriptors.
const fn security(tag: u8, name: &'static str, kind: ValueKind) -> TagEntry {
    TagEntry {
        tag: Tag(tag),
        name,
        descriptors: None,
        units: None,
        kind,
    }
}

const fn mapped(domain: (i64, i64), range: (f64, f64)) -> ValueKind {
    ValueKind::Mapped { domain, range }
}

const fn utf8() -> ValueKind {
    ValueKind::Text {
        encoding: TextEncoding::Utf8,
    }
}

const fn iso646() -> ValueKind {
    ValueKind::Text {
        encoding: TextEncoding::Iso646,
    }
}

const fn uint(length: u8) -> ValueKind {
    ValueKind::Integer {
        length,
        signed: false,
    }
}

/// Icing Detected (ST 0601 tag 34).
pub const ICING_DETECTED: EnumSymbols = &[
    (0, "Detector off"),
    (1, "No icing Detected"),
    (2, "Icing Detected"),
];

/// Sensor Field of View Name (ST 0601 tag 63).
pub const SENSOR_FOV_NAME: EnumSymbols = &[
    (0, "Ultranarrow"),
    (1, "Narrow"),
    (2, "Medium"),
    (3, "Wide"),
    (4, "Ultrawide"),
    (5, "Narrow Medium"),
    (6, "2x Ultranarrow"),
    (7, "4x Ultranarrow"),
];

/// Operational Mode (ST 0601 tag 77).
pub const OPERATIONAL_MODE: EnumSymbols = &[
    (0, "Other"),
    (1, "Operational"),
    (2, "Training"),
    (3, "Exercise"),
    (4, "Maintenance"),
    (5, "Test"),
];

/// Security Classification (ST 0102 tag 1).
pub const SECURITY_CLASSIFICATION: EnumSymbols = &[
    (1, "UNCLASSIFIED"),
    (2, "RESTRICTED"),
    (3, "CONFIDENTIAL"),
    (4, "SECRET"),
    (5, "TOP SECRET"),
];

/// Classifying Country and Releasing Instructions Country Coding Method
/// (ST 0102 tag 2).
pub const CLASSIFYING_COUNTRY_CODING: EnumSymbols = &[
    (0x01, "ISO-3166 Two Letter"),
    (0x02, "ISO-3166 Three Letter"),
    (0x03, "FIPS 10-4 Two Letter"),
    (0x04, "FIPS 10-4 Four Letter"),
    (0x05, "ISO-3166 Numeric"),
    (0x06, "1059 Two Letter"),
    (0x07, "1059 Three Letter"),
    (0x08, "Omitted Value"),
    (0x09, "Omitted Value"),
    (0x0A, "FIPS 10-4 Mixed"),
    (0x0B, "ISO 3166 Mixed"),
    (0x0C, "STANAG 1059 Mixed"),
    (0x0D, "GENC Two Letter"),
    (0x0E, "GENC Three Letter"),
    (0x0F, "GENC Numeric"),
    (0x10, "GENC Mixed"),
];

/// Object Country Coding Method (ST 0102 tag 12).
pub const OBJECT_COUNTRY_CODING: EnumSymbols = &[
    (0x01, "ISO-3166 Two Letter"),
    (0x02, "ISO-3166 Three Letter"),
    (0x03, "ISO-3166 Numeric"),
    (0x04, "FIPS 10-4 Two Letter"),
    (0x05, "FIPS 10-4 Four Letter"),
    (0x06, "1059 Two Letter"),
    (0x07, "1059 Three Letter"),
    (0x08, "Omitted Value"),
    (0x09, "Omitted Value"),
    (0x0A, "Omitted Value"),
    (0x0B, "Omitted Value"),
    (0x0C, "Omitted Value"),
    (0x0D, "GENC Two Letter"),
    (0x0E, "GENC Three Letter"),
    (0x0F, "GENC Numeric"),
    (0x40, "GENC AdminSub"),
];

/// The UAS Datalink Local Set table (MISB ST 0601).
pub static UAS_DATALINK: &[TagEntry] = &[
    uas(1, "Checksum", "", "", None, ValueKind::Bytes),
    uas(
        2,
        "Precision Time Stamp",
        "",
        "User Defined Time Stamp",
        Some("microseconds"),
        ValueKind::DateTime,
    ),
    uas(3, "Mission ID", "Mission Number", "Episode Number", None, utf8()),
    uas(4, "Platform Tail Number", "Platform Tail Number", "", None, utf8()),
    uas(
        5,
        "Platform Heading Angle",
        "UAV Heading (INS)",
        "Platform Heading Angle",
        DEGREES,
        mapped(UINT16, (0.0, 360.0)),
    ),
    uas(
        6,
        "Platform Pitch Angle",
        "UAV Pitch (INS)",
        "Platform Pitch Angle",
        DEGREES,
        mapped(SINT16, (-20.0, 20.0)),
    ),
    uas(
        7,
        "Platform Roll Angle",
        "UAV Roll (INS)",
        "Platform Roll Angle",
        DEGREES,
        mapped(SINT16, (-50.0, 50.0)),
    ),
    uas(
        8,
        "Platform True Airspeed",
        "True Airspeed",
        "",
        METERS_PER_SECOND,
        mapped(UINT8, (0.0, 255.0)),
    ),
    uas(
        9,
        "Platform Indicated Airspeed",
        "Indicated Airspeed",
        "",
        METERS_PER_SECOND,
        mapped(UINT8, (0.0, 255.0)),
    ),
    uas(10, "Platform Designation", "Platform Designation", "Device Designation", None, utf8()),
    uas(11, "Image Source Sensor", "", "Image Source Device", None, utf8()),
    uas(12, "Image Coordinate System", "", "Image Coordinate System", None, utf8()),
    uas(
        13,
        "Sensor Latitude",
        "Sensor Latitude",
        "Device Latitude",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        14,
        "Sensor Longitude",
        "Sensor Longitude",
        "Device Longitude",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        15,
        "Sensor True Altitude",
        "Sensor Altitude",
        "Device Altitude",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        16,
        "Sensor Horizontal Field of View",
        "Field of View",
        "Field of View (Horizontal)",
        DEGREES,
        mapped(UINT16, (0.0, 180.0)),
    ),
    uas(
        17,
        "Sensor Vertical Field of View",
        "Vertical Field of View",
        "",
        DEGREES,
        mapped(UINT16, (0.0, 180.0)),
    ),
    uas(
        18,
        "Sensor Relative Azimuth Angle",
        "",
        "",
        DEGREES,
        mapped(UINT32, (0.0, 360.0)),
    ),
    uas(
        19,
        "Sensor Relative Elevation Angle",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        20,
        "Sensor Relative Roll Angle",
        "",
        "",
        DEGREES,
        mapped(UINT32, (0.0, 360.0)),
    ),
    uas(
        21,
        "Slant Range",
        "Slant Range",
        "Slant Range",
        METERS,
        mapped(UINT32, (0.0, 5_000_000.0)),
    ),
    uas(
        22,
        "Target Width",
        "Target Width",
        "Target Width",
        METERS,
        mapped(UINT16, (0.0, 10_000.0)),
    ),
    uas(
        23,
        "Frame Center Latitude",
        "Target Latitude",
        "Frame Center Latitude",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        24,
        "Frame Center Longitude",
        "Target Longitude",
        "Frame Center Longitude",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        25,
        "Frame Center Elevation",
        "Target Elevation",
        "Frame Center Elevation",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        26,
        "Offset Corner Latitude Point 1",
        "",
        "Corner Latitude Point 1",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        27,
        "Offset Corner Longitude Point 1",
        "",
        "Corner Longitude Point 1",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        28,
        "Offset Corner Latitude Point 2",
        "",
        "Corner Latitude Point 2",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        29,
        "Offset Corner Longitude Point 2",
        "",
        "Corner Longitude Point 2",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        30,
        "Offset Corner Latitude Point 3",
        "",
        "Corner Latitude Point 3",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        31,
        "Offset Corner Longitude Point 3",
        "",
        "Corner Longitude Point 3",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        32,
        "Offset Corner Latitude Point 4",
        "",
        "Corner Latitude Point 4",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        33,
        "Offset Corner Longitude Point 4",
        "",
        "Corner Longitude Point 4",
        DEGREES,
        mapped(SINT16, (-0.075, 0.075)),
    ),
    uas(
        34,
        "Icing Detected",
        "Icing Detected",
        "",
        Some("flag"),
        ValueKind::Enumerated {
            length: 1,
            symbols: ICING_DETECTED,
        },
    ),
    uas(
        35,
        "Wind Direction",
        "Wind Direction",
        "",
        DEGREES,
        mapped(UINT16, (0.0, 360.0)),
    ),
    uas(
        36,
        "Wind Speed",
        "Wind Speed",
        "",
        METERS_PER_SECOND,
        mapped(UINT8, (0.0, 100.0)),
    ),
    uas(
        37,
        "Static Pressure",
        "Static Pressure",
        "",
        MILLIBAR,
        mapped(UINT16, (0.0, 5000.0)),
    ),
    uas(
        38,
        "Density Altitude",
        "Density Altitude",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        39,
        "Outside Air Temperature",
        "Air Temperature",
        "",
        Some("celsius"),
        ValueKind::Integer {
            length: 1,
            signed: true,
        },
    ),
    uas(
        40,
        "Target Location Latitude",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        41,
        "Target Location Longitude",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        42,
        "Target Location Elevation",
        "",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        43,
        "Target Track Gate Width",
        "",
        "",
        Some("pixels"),
        mapped(UINT8, (0.0, 510.0)),
    ),
    uas(
        44,
        "Target Track Gate Height",
        "",
        "",
        Some("pixels"),
        mapped(UINT8, (0.0, 510.0)),
    ),
    uas(
        45,
        "Target Error Estimate - CE90",
        "",
        "",
        METERS,
        mapped(UINT16, (0.0, 4095.0)),
    ),
    uas(
        46,
        "Target Error Estimate - LE90",
        "",
        "",
        METERS,
        mapped(UINT16, (0.0, 4095.0)),
    ),
    uas(47, "Generic Flag Data 01", "", "", None, uint(1)),
    TagEntry {
        tag: Tag(48),
        name: "Security Local Metadata Set",
        descriptors: Some(Descriptors {
            esd_name: "",
            uds_name: "Security Local Set",
        }),
        units: None,
        kind: ValueKind::Set(&SECURITY_LOCAL_SET),
    },
    uas(
        49,
        "Differential Pressure",
        "",
        "",
        MILLIBAR,
        mapped(UINT16, (0.0, 5000.0)),
    ),
    uas(
        50,
        "Platform Angle of Attack",
        "",
        "",
        DEGREES,
        mapped(SINT16, (-20.0, 20.0)),
    ),
    uas(
        51,
        "Platform Vertical Speed",
        "",
        "",
        METERS_PER_SECOND,
        mapped(SINT16, (-180.0, 180.0)),
    ),
    uas(
        52,
        "Platform Sideslip Angle",
        "",
        "",
        DEGREES,
        mapped(SINT16, (-20.0, 20.0)),
    ),
    uas(
        53,
        "Airfield Barometric Pressure",
        "",
        "",
        MILLIBAR,
        mapped(UINT16, (0.0, 5000.0)),
    ),
    uas(
        54,
        "Airfield Elevation",
        "",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        55,
        "Relative Humidity",
        "",
        "",
        Some("%"),
        mapped(UINT8, (0.0, 100.0)),
    ),
    uas(
        56,
        "Platform Ground Speed",
        "Platform Ground Speed",
        "",
        METERS_PER_SECOND,
        mapped(UINT8, (0.0, 255.0)),
    ),
    uas(
        57,
        "Ground Range",
        "Ground Range",
        "",
        METERS,
        mapped(UINT32, (0.0, 5_000_000.0)),
    ),
    uas(
        58,
        "Platform Fuel Remaining",
        "Platform Fuel Remaining",
        "",
        Some("kilograms"),
        mapped(UINT16, (0.0, 10_000.0)),
    ),
    uas(59, "Platform Call Sign", "Platform Call Sign", "", None, utf8()),
    uas(60, "Weapon Load", "Weapon Load", "", None, uint(2)),
    uas(61, "Weapon Fired", "Weapon Fired", "", None, uint(1)),
    uas(62, "Laser PRF Code", "Laser PRF Code", "", None, uint(2)),
    uas(
        63,
        "Sensor Field of View Name",
        "Sensor Field of View Name",
        "",
        None,
        ValueKind::Enumerated {
            length: 1,
            symbols: SENSOR_FOV_NAME,
        },
    ),
    uas(
        64,
        "Platform Magnetic Heading",
        "Platform Magnetic Heading",
        "",
        DEGREES,
        mapped(UINT16, (0.0, 360.0)),
    ),
    uas(65, "UAS Datalink LS Version Number", "", "", None, uint(1)),
    uas(
        67,
        "Alternate Platform Latitude",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        68,
        "Alternate Platform Longitude",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        69,
        "Alternate Platform Altitude",
        "",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(70, "Alternate Platform Name", "", "", None, utf8()),
    uas(
        71,
        "Alternate Platform Heading",
        "",
        "",
        DEGREES,
        mapped(UINT16, (0.0, 360.0)),
    ),
    uas(
        72,
        "Event Start Time - UTC",
        "Mission Start Time, Date, and Date of Collection",
        "Event Start Date Time - UTC",
        Some("microseconds"),
        ValueKind::DateTime,
    ),
    uas(
        73,
        "RVT Local Data Set",
        "",
        "Remote Video Terminal Local Set",
        None,
        ValueKind::Bytes,
    ),
    uas(
        74,
        "VMTI Local Set",
        "",
        "Video Moving Target Indicator Local Set",
        None,
        ValueKind::Bytes,
    ),
    uas(
        75,
        "Sensor Ellipsoid Height",
        "",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        76,
        "Alternate Platform Ellipsoid Height",
        "",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        77,
        "Operational Mode",
        "",
        "",
        None,
        ValueKind::Enumerated {
            length: 1,
            symbols: OPERATIONAL_MODE,
        },
    ),
    uas(
        78,
        "Frame Center Height Above Ellipsoid",
        "",
        "",
        METERS,
        mapped(UINT16, (-900.0, 19000.0)),
    ),
    uas(
        79,
        "Sensor North Velocity",
        "",
        "",
        METERS_PER_SECOND,
        mapped(SINT16, (-327.0, 327.0)),
    ),
    uas(
        80,
        "Sensor East Velocity",
        "",
        "",
        METERS_PER_SECOND,
        mapped(SINT16, (-327.0, 327.0)),
    ),
    uas(
        82,
        "Corner Latitude Point 1 (Full)",
        "",
        "Corner Latitude Point 1",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        83,
        "Corner Longitude Point 1 (Full)",
        "",
        "Corner Longitude Point 1",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        84,
        "Corner Latitude Point 2 (Full)",
        "",
        "Corner Latitude Point 2",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        85,
        "Corner Longitude Point 2 (Full)",
        "",
        "Corner Longitude Point 2",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        86,
        "Corner Latitude Point 3 (Full)",
        "",
        "Corner Latitude Point 3",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        87,
        "Corner Longitude Point 3 (Full)",
        "",
        "Corner Longitude Point 3",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        88,
        "Corner Latitude Point 4 (Full)",
        "",
        "Corner Latitude Point 4",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        89,
        "Corner Longitude Point 4 (Full)",
        "",
        "Corner Longitude Point 4",
        DEGREES,
        mapped(SINT32, (-180.0, 180.0)),
    ),
    uas(
        90,
        "Platform Pitch Angle (Full)",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        91,
        "Platform Roll Angle (Full)",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        92,
        "Platform Angle of Attack (Full)",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        93,
        "Platform Sideslip Angle (Full)",
        "",
        "",
        DEGREES,
        mapped(SINT32, (-90.0, 90.0)),
    ),
    uas(
        96,
        "Target Width Extended",
        "Target Width",
        "Target Width",
        METERS,
        ValueKind::Imapb {
            range: (0.0, 1_500_000.0),
        },
    ),
    uas(
        103,
        "Density Altitude Extended",
        "Density Altitude",
        "",
        METERS,
        ValueKind::Imapb {
            range: (-900.0, 40_000.0),
        },
    ),
    uas(
        104,
        "Sensor Ellipsoid Height Extended",
        "",
        "",
        METERS,
        ValueKind::Imapb {
            range: (-900.0, 40_000.0),
        },
    ),
    uas(
        105,
        "Alternate Platform Ellipsoid Height Extended",
        "",
        "",
        METERS,
        ValueKind::Imapb {
            range: (-900.0, 40_000.0),
        },
    ),
];

/// The Security Local Set table (MISB ST 0102).
pub static SECURITY: &[TagEntry] = &[
    security(
        1,
        "Security Classification",
        ValueKind::Enumerated {
            length: 1,
            symbols: SECURITY_CLASSIFICATION,
        },
    ),
    security(
        2,
        "Classifying Country and Releasing Instructions Country Coding Method",
        ValueKind::Enumerated {
            length: 1,
            symbols: CLASSIFYING_COUNTRY_CODING,
        },
    ),
    security(3, "Classifying Country", iso646()),
    security(4, "Security-SCI/SHI Information", iso646()),
    security(5, "Caveats", iso646()),
    security(6, "Releasing Instructions", iso646()),
    security(7, "Classified By", iso646()),
    security(8, "Derived From", iso646()),
    security(9, "Classification Reason", iso646()),
    security(10, "Declassification Date", iso646()),
    security(11, "Classification and Marking System", iso646()),
    security(
        12,
        "Object Country Coding Method",
        ValueKind::Enumerated {
            length: 1,
            symbols: OBJECT_COUNTRY_CODING,
        },
    ),
    security(
        13,
        "Object Country Codes",
        ValueKind::Text {
            encoding: TextEncoding::Utf16Be,
        },
    ),
    security(14, "Classification Comments", iso646()),
    security(15, "Unique Material Identifier Video", ValueKind::Bytes),
    security(16, "Unique Material Identifier Audio", ValueKind::Bytes),
    security(17, "Unique Material Identifier Data", ValueKind::Bytes),
    security(18, "Unique Material Identifier System", ValueKind::Bytes),
    security(19, "Stream Identifier", uint(1)),
    security(20, "Transport Stream Identifier", uint(2)),
    security(21, "Item Designator Identifier", ValueKind::Bytes),
    security(22, "Version", uint(2)),
    security(
        23,
        "Classifying Country Coding Method Version Date",
        iso646(),
    ),
    security(24, "Object Country Coding Method Version Date", iso646()),
];
