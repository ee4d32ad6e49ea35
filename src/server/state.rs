use crate::geocode::Geocoder;
use crate::weather::WeatherClient;
use std::sync::Mutex;

pub struct AppState {
    pub geocoder: Mutex<Geocoder>,
    pub weather: Mutex<WeatherClient>,
}
