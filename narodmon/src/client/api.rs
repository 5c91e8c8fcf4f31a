//! Typed façade over the narodmon commands.
//!
//! Every method shapes its arguments into a [`Command`] and hands it to the
//! [`RequestPipeline`]; the decoded response is returned untouched.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::command::Command;
use super::pipeline::RequestPipeline;
use crate::cache::CacheStore;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::identity::SessionIdentity;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the narodmon.ru JSON API.
///
/// Calls block until the response is decoded. The client is `Send + Sync`
/// when its transport is, so it can be shared across threads behind an
/// `Arc`.
///
/// # Example
///
/// ```no_run
/// use narodmon::NarodmonClient;
///
/// let client = NarodmonClient::new("my-device-id", "API_KEY")?;
/// client.login("user", "password")?;
/// let nearby = client.public_sensors(&[1, 2, 3], Some(50), None, None)?;
/// println!("{}", nearby);
/// # Ok::<(), narodmon::ApiError>(())
/// ```
pub struct NarodmonClient<T: Transport = ReqwestTransport> {
    pipeline: RequestPipeline<T>,
}

impl NarodmonClient<ReqwestTransport> {
    /// Creates a client with the default configuration.
    pub fn new(device_id: &str, api_key: impl Into<String>) -> ApiResult<Self> {
        Self::from_config(device_id, api_key, ClientConfig::default())
    }

    /// Creates a reqwest-backed client with the given configuration.
    pub fn from_config(
        device_id: &str,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> ApiResult<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout)?;
        Ok(Self::with_transport(transport, device_id, api_key, config))
    }
}

impl<T: Transport> NarodmonClient<T> {
    /// Creates a client over a custom transport.
    ///
    /// `config.timeout` is ignored; the transport applies its own.
    pub fn with_transport(
        transport: T,
        device_id: &str,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Self {
        let identity = SessionIdentity::new(device_id, api_key, config.lang);
        Self {
            pipeline: RequestPipeline::new(transport, identity, config.endpoint),
        }
    }

    /// Enables response caching with the given store.
    pub fn with_cache(self, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            pipeline: self.pipeline.with_cache(cache),
        }
    }

    pub fn identity(&self) -> &SessionIdentity {
        self.pipeline.identity()
    }

    pub fn endpoint(&self) -> &str {
        self.pipeline.endpoint()
    }

    pub fn transport(&self) -> &T {
        self.pipeline.transport()
    }

    /// Executes an arbitrary command with raw parameters.
    pub fn execute(&self, command: &str, params: Map<String, Value>) -> ApiResult<Value> {
        self.pipeline.execute(command, params)
    }

    /// Executes a prepared [`Command`].
    pub fn run(&self, command: Command) -> ApiResult<Value> {
        let (name, params) = command.into_parts();
        self.pipeline.execute(name, params)
    }

    /// Registers the application and returns server-side settings.
    pub fn sensor_init(&self) -> ApiResult<Value> {
        self.run(Command::sensor_init())
    }

    /// Location the server associates with this device or user.
    pub fn get_location(&self) -> ApiResult<Value> {
        self.run(Command::get_location())
    }

    pub fn set_location(&self, lat: f64, lng: f64) -> ApiResult<Value> {
        self.run(Command::set_location(lat, lng))
    }

    /// Devices owned by the logged-in user.
    pub fn my_sensors(&self, types: &[u32]) -> ApiResult<Value> {
        self.run(Command::my_sensors(types))
    }

    /// Public devices within `radius` km (default 100).
    ///
    /// Coordinates are sent only when both are given; otherwise the server
    /// uses the stored location.
    pub fn public_sensors(
        &self,
        types: &[u32],
        radius: Option<u32>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> ApiResult<Value> {
        self.run(Command::public_sensors(types, radius, lat, lng))
    }

    /// General `sensorNear` query.
    pub fn sensor_near(
        &self,
        my: bool,
        public: bool,
        types: &[u32],
        radius: Option<u32>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> ApiResult<Value> {
        self.run(Command::sensor_near(my, public, types, radius, lat, lng))
    }

    /// Details of one device.
    pub fn sensor_dev(&self, id: u64) -> ApiResult<Value> {
        self.run(Command::sensor_dev(id))
    }

    /// Reads the favourites list, or replaces it with `sensors`.
    pub fn sensor_fav(&self, sensors: Option<&[u64]>) -> ApiResult<Value> {
        self.run(Command::sensor_fav(sensors))
    }

    /// Current readings of the given sensors.
    pub fn sensor_info(&self, sensors: &[u64]) -> ApiResult<Value> {
        self.run(Command::sensor_info(sensors))
    }

    /// Reading history of one sensor.
    pub fn sensor_log(&self, id: u64) -> ApiResult<Value> {
        self.run(Command::sensor_log(id))
    }

    /// Webcams within `radius` km (default 100).
    pub fn camera_near(
        &self,
        radius: Option<u32>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> ApiResult<Value> {
        self.run(Command::camera_near(radius, lat, lng))
    }

    /// Recent snapshots of one webcam.
    pub fn camera_shots(&self, id: u64) -> ApiResult<Value> {
        self.run(Command::camera_shots(id))
    }

    /// Logs in; only the salted password hash is sent.
    pub fn login(&self, login: &str, password: &str) -> ApiResult<Value> {
        self.run(Command::login(self.identity(), login, password))
    }

    pub fn logout(&self) -> ApiResult<Value> {
        self.run(Command::logout())
    }

    /// Last known position of a tracked object.
    pub fn object_where(&self, imei: &str) -> ApiResult<Value> {
        self.run(Command::object_where(imei))
    }
}
