//! Tag constants for the standard local sets,
//! for use in element lookups without magic numbers.

use klv_core::Tag;

/// Checksum
pub const CHECKSUM: Tag = Tag(1);
/// Precision Time Stamp
pub const PRECISION_TIME_STAMP: Tag = Tag(2);
/// Mission ID
pub const MISSION_ID: Tag = Tag(3);
/// Platform Tail Number
pub const PLATFORM_TAIL_NUMBER: Tag = Tag(4);
/// Platform Heading Angle
pub const PLATFORM_HEADING_ANGLE: Tag = Tag(5);
/// Platform Pitch Angle
pub const PLATFORM_PITCH_ANGLE: Tag = Tag(6);
/// Platform Roll Angle
pub const PLATFORM_ROLL_ANGLE: Tag = Tag(7);
/// Platform True Airspeed
pub const PLATFORM_TRUE_AIRSPEED: Tag = Tag(8);
/// Platform Indicated Airspeed
pub const PLATFORM_INDICATED_AIRSPEED: Tag = Tag(9);
/// Platform Designation
pub const PLATFORM_DESIGNATION: Tag = Tag(10);
/// Image Source Sensor
pub const IMAGE_SOURCE_SENSOR: Tag = Tag(11);
/// Image Coordinate System
pub const IMAGE_COORDINATE_SYSTEM: Tag = Tag(12);
/// Sensor Latitude
pub const SENSOR_LATITUDE: Tag = Tag(13);
/// Sensor Longitude
pub const SENSOR_LONGITUDE: Tag = Tag(14);
/// Sensor True Altitude
pub const SENSOR_TRUE_ALTITUDE: Tag = Tag(15);
/// Sensor Horizontal Field of View
pub const SENSOR_HORIZONTAL_FOV: Tag = Tag(16);
/// Sensor Vertical Field of View
pub const SENSOR_VERTICAL_FOV: Tag = Tag(17);
/// Sensor Relative Azimuth Angle
pub const SENSOR_RELATIVE_AZIMUTH_ANGLE: Tag = Tag(18);
/// Sensor Relative Elevation Angle
pub const SENSOR_RELATIVE_ELEVATION_ANGLE: Tag = Tag(19);
/// Sensor Relative Roll Angle
pub const SENSOR_RELATIVE_ROLL_ANGLE: Tag = Tag(20);
/// Slant Range
pub const SLANT_RANGE: Tag = Tag(21);
/// Target Width
pub const TARGET_WIDTH: Tag = Tag(22);
/// Frame Center Latitude
pub const FRAME_CENTER_LATITUDE: Tag = Tag(23);
/// Frame Center Longitude
pub const FRAME_CENTER_LONGITUDE: Tag = Tag(24);
/// Frame Center Elevation
pub const FRAME_CENTER_ELEVATION: Tag = Tag(25);
/// Icing Detected
pub const ICING_DETECTED: Tag = Tag(34);
/// Wind Direction
pub const WIND_DIRECTION: Tag = Tag(35);
/// Wind Speed
pub const WIND_SPEED: Tag = Tag(36);
/// Outside Air Temperature
pub const OUTSIDE_AIR_TEMPERATURE: Tag = Tag(39);
/// Security Local Metadata Set
pub const SECURITY_LOCAL_SET: Tag = Tag(48);
/// Platform Call Sign
pub const PLATFORM_CALL_SIGN: Tag = Tag(59);
/// Sensor Field of View Name
pub const SENSOR_FOV_NAME: Tag = Tag(63);
/// UAS Datalink LS Version Number
pub const UAS_LS_VERSION_NUMBER: Tag = Tag(65);
/// Event Start Time - UTC
pub const EVENT_START_TIME: Tag = Tag(72);
/// Operational Mode
pub const OPERATIONAL_MODE: Tag = Tag(77);
/// Target Width Extended
pub const TARGET_WIDTH_EXTENDED: Tag = Tag(96);
/// Density Altitude Extended
pub const DENSITY_ALTITUDE_EXTENDED: Tag = Tag(103);
/// Sensor Ellipsoid Height Extended
pub const SENSOR_ELLIPSOID_HEIGHT_EXTENDED: Tag = Tag(104);

/// Tag constants of the ST 0102 Security Local Set.
pub mod security {
    use klv_core::Tag;

    /// Security Classification
    pub const SECURITY_CLASSIFICATION: Tag = Tag(1);
    /// Classifying Country and Releasing Instructions Country Coding Method
    pub const CLASSIFYING_COUNTRY_CODING_METHOD: Tag = Tag(2);
    /// Classifying Country
    pub const CLASSIFYING_COUNTRY: Tag = Tag(3);
    /// Object Country Coding Method
    pub const OBJECT_COUNTRY_CODING_METHOD: Tag = Tag(12);
    /// Object Country Codes
    pub const OBJECT_COUNTRY_CODES: Tag = Tag(13);
    /// Stream Identifier
    pub const STREAM_IDENTIFIER: Tag = Tag(19);
    /// Transport Stream Identifier
    pub const TRANSPORT_STREAM_IDENTIFIER: Tag = Tag(20);
    /// Version
    pub const VERSION: Tag = Tag(22);
}
