//! Parameter shaping for each remote command.
//!
//! A [`Command`] is a command name plus the fields it adds to the request
//! envelope. The constructors here encode the wire rules:
//!
//! - Boolean flags (`my`, `pub`) are sent as `0`/`1`
//! - Coordinates are sent only when both latitude and longitude are given
//! - List parameters are passed through in order, duplicates included
//! - `sensorFav` omits `sensors` entirely unless the list is non-empty

use serde_json::{Map, Value};

use crate::identity::SessionIdentity;

/// Radius (km) used when a radius command is called without one.
pub const DEFAULT_RADIUS: u32 = 100;

/// Radius (km) used by [`Command::my_sensors`].
pub const MY_SENSORS_RADIUS: u32 = 10_000;

/// Client version reported by `sensorInit`.
pub const CLIENT_VERSION: &str = "1.1";

/// Platform version reported by `sensorInit`.
pub const CLIENT_PLATFORM: &str = "6.0";

/// A remote command with its envelope fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: &'static str,
    params: Map<String, Value>,
}

impl Command {
    /// Creates a command without parameters.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Map::new(),
        }
    }

    /// Adds a field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Adds `lat` and `lng` when both are present; a lone coordinate is dropped.
    pub fn with_location(self, lat: Option<f64>, lng: Option<f64>) -> Self {
        match (lat, lng) {
            (Some(lat), Some(lng)) => self.with("lat", lat).with("lng", lng),
            _ => self,
        }
    }

    /// The command name sent as `cmd`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The command-specific fields.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn into_parts(self) -> (&'static str, Map<String, Value>) {
        (self.name, self.params)
    }

    pub fn sensor_init() -> Self {
        Self::new("sensorInit")
            .with("version", CLIENT_VERSION)
            .with("platform", CLIENT_PLATFORM)
    }

    pub fn get_location() -> Self {
        Self::new("getLocation")
    }

    pub fn set_location(lat: f64, lng: f64) -> Self {
        Self::new("setLocation").with("lat", lat).with("lng", lng)
    }

    /// Devices owned by the logged-in user, within [`MY_SENSORS_RADIUS`].
    pub fn my_sensors(types: &[u32]) -> Self {
        Self::new("sensorNear")
            .with("my", 1)
            .with("radius", MY_SENSORS_RADIUS)
            .with("types", types.to_vec())
    }

    /// Public devices around the given (or stored) location.
    pub fn public_sensors(
        types: &[u32],
        radius: Option<u32>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Self {
        Self::new("sensorNear")
            .with("pub", 1)
            .with("radius", radius.unwrap_or(DEFAULT_RADIUS))
            .with("types", types.to_vec())
            .with_location(lat, lng)
    }

    pub fn sensor_near(
        my: bool,
        public: bool,
        types: &[u32],
        radius: Option<u32>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Self {
        Self::new("sensorNear")
            .with("my", u8::from(my))
            .with("pub", u8::from(public))
            .with("radius", radius.unwrap_or(DEFAULT_RADIUS))
            .with("types", types.to_vec())
            .with_location(lat, lng)
    }

    pub fn sensor_dev(id: u64) -> Self {
        Self::new("sensorDev").with("id", id)
    }

    /// Reads the favourites list, or replaces it when `sensors` is non-empty.
    pub fn sensor_fav(sensors: Option<&[u64]>) -> Self {
        let command = Self::new("sensorFav");
        match sensors {
            Some(ids) if !ids.is_empty() => command.with("sensors", ids.to_vec()),
            _ => command,
        }
    }

    pub fn sensor_info(sensors: &[u64]) -> Self {
        Self::new("sensorInfo").with("sensors", sensors.to_vec())
    }

    pub fn sensor_log(id: u64) -> Self {
        Self::new("sensorLog").with("id", id)
    }

    pub fn camera_near(radius: Option<u32>, lat: Option<f64>, lng: Option<f64>) -> Self {
        Self::new("cameraNear")
            .with("radius", radius.unwrap_or(DEFAULT_RADIUS))
            .with_location(lat, lng)
    }

    pub fn camera_shots(id: u64) -> Self {
        Self::new("cameraShots").with("id", id)
    }

    /// Login with a hashed password; the clear-text password never leaves.
    pub fn login(identity: &SessionIdentity, login: &str, password: &str) -> Self {
        Self::new("login")
            .with("login", login)
            .with("hash", identity.password_hash(password))
    }

    pub fn logout() -> Self {
        Self::new("logout")
    }

    pub fn object_where(imei: &str) -> Self {
        Self::new("objectWhere").with("imei", imei)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::md5_hex;
    use serde_json::json;

    fn params(command: &Command) -> Value {
        Value::Object(command.params().clone())
    }

    #[test]
    fn test_sensor_init() {
        let command = Command::sensor_init();
        assert_eq!(command.name(), "sensorInit");
        assert_eq!(params(&command), json!({"version": "1.1", "platform": "6.0"}));
    }

    #[test]
    fn test_location_commands() {
        assert_eq!(Command::get_location().name(), "getLocation");
        assert!(Command::get_location().params().is_empty());

        let command = Command::set_location(1.0, 2.0);
        assert_eq!(command.name(), "setLocation");
        assert_eq!(params(&command), json!({"lat": 1.0, "lng": 2.0}));
    }

    #[test]
    fn test_my_sensors() {
        let command = Command::my_sensors(&[]);
        assert_eq!(command.name(), "sensorNear");
        assert_eq!(params(&command), json!({"my": 1, "radius": 10000, "types": []}));

        let command = Command::my_sensors(&[1, 2, 3]);
        assert_eq!(
            params(&command),
            json!({"my": 1, "radius": 10000, "types": [1, 2, 3]})
        );
    }

    #[test]
    fn test_public_sensors() {
        let command = Command::public_sensors(&[], None, None, None);
        assert_eq!(command.name(), "sensorNear");
        assert_eq!(params(&command), json!({"pub": 1, "radius": 100, "types": []}));

        let command = Command::public_sensors(&[1, 2, 3], Some(200), Some(1.0), Some(2.0));
        assert_eq!(
            params(&command),
            json!({"pub": 1, "radius": 200, "types": [1, 2, 3], "lat": 1.0, "lng": 2.0})
        );
    }

    #[test]
    fn test_sensor_near() {
        let command = Command::sensor_near(false, false, &[1, 2], Some(200), Some(1.0), Some(2.0));
        assert_eq!(command.name(), "sensorNear");
        assert_eq!(
            params(&command),
            json!({"my": 0, "pub": 0, "radius": 200, "types": [1, 2], "lat": 1.0, "lng": 2.0})
        );

        let command = Command::sensor_near(true, true, &[], None, None, None);
        assert_eq!(
            params(&command),
            json!({"my": 1, "pub": 1, "radius": 100, "types": []})
        );
    }

    #[test]
    fn test_partial_coordinates_are_dropped() {
        let command = Command::public_sensors(&[], Some(50), Some(55.7), None);
        assert!(!command.params().contains_key("lat"));
        assert!(!command.params().contains_key("lng"));

        let command = Command::camera_near(None, None, Some(37.6));
        assert_eq!(params(&command), json!({"radius": 100}));
    }

    #[test]
    fn test_types_keep_order_and_duplicates() {
        let command = Command::my_sensors(&[3, 1, 3]);
        assert_eq!(command.params()["types"], json!([3, 1, 3]));
    }

    #[test]
    fn test_sensor_fav_without_sensors_omits_field() {
        let command = Command::sensor_fav(None);
        assert_eq!(command.name(), "sensorFav");
        assert!(command.params().is_empty());

        assert!(Command::sensor_fav(Some(&[][..])).params().is_empty());
    }

    #[test]
    fn test_sensor_fav_with_sensors() {
        let command = Command::sensor_fav(Some(&[1, 2, 3][..]));
        assert_eq!(params(&command), json!({"sensors": [1, 2, 3]}));
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(params(&Command::sensor_dev(1)), json!({"id": 1}));
        assert_eq!(params(&Command::sensor_log(1)), json!({"id": 1}));
        assert_eq!(params(&Command::camera_shots(1)), json!({"id": 1}));
        assert_eq!(Command::sensor_dev(1).name(), "sensorDev");
        assert_eq!(Command::sensor_log(1).name(), "sensorLog");
        assert_eq!(Command::camera_shots(1).name(), "cameraShots");
    }

    #[test]
    fn test_sensor_info() {
        let command = Command::sensor_info(&[1, 2, 3]);
        assert_eq!(command.name(), "sensorInfo");
        assert_eq!(params(&command), json!({"sensors": [1, 2, 3]}));
    }

    #[test]
    fn test_camera_near() {
        let command = Command::camera_near(Some(200), None, None);
        assert_eq!(command.name(), "cameraNear");
        assert_eq!(params(&command), json!({"radius": 200}));

        let command = Command::camera_near(Some(200), Some(1.0), Some(2.0));
        assert_eq!(params(&command), json!({"radius": 200, "lat": 1.0, "lng": 2.0}));
    }

    #[test]
    fn test_login_hash() {
        let identity = SessionIdentity::new("uuid", "apiKey", "ru");
        let command = Command::login(&identity, "foo", "bar");

        let expected = md5_hex(&format!("{}{}", md5_hex("uuid"), md5_hex("bar")));
        assert_eq!(command.name(), "login");
        assert_eq!(params(&command), json!({"login": "foo", "hash": expected}));
    }

    #[test]
    fn test_logout_and_object_where() {
        assert_eq!(Command::logout().name(), "logout");
        assert!(Command::logout().params().is_empty());

        let command = Command::object_where("123456");
        assert_eq!(command.name(), "objectWhere");
        assert_eq!(params(&command), json!({"imei": "123456"}));
    }
}
