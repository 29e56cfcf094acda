//! Plain-text rendering of the dashboard.

use std::fmt;

use skycast_core::Units;
use skycast_weather::icon_url;

use crate::model::DashboardModel;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub units: Units,
    /// Base URL for provider icon PNGs
    pub icon_base_url: String,
}

/// Display adapter for a [`DashboardModel`]
pub struct DashboardView<'a> {
    pub model: &'a DashboardModel,
    pub options: &'a RenderOptions,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let temp_unit = self.options.units.temperature_symbol();
        let wind_unit = self.options.units.wind_speed_symbol();

        writeln!(f, "Weather App")?;

        if let Some(error) = self.model.error_message() {
            writeln!(f, "! {error}")?;
        }

        if self.model.is_loading() && !self.model.has_data() {
            writeln!(f, "Loading...")?;
        }

        if let Some(current) = self.model.current() {
            let variant = current.icon_variant();
            writeln!(f)?;
            writeln!(f, "{}", current.place_name)?;
            writeln!(f, "{}", current.description)?;
            writeln!(
                f,
                "Temperature: {}{} (feels like {}{})",
                current.temperature, temp_unit, current.feels_like, temp_unit
            )?;
            writeln!(f, "Humidity: {}%", current.humidity)?;
            writeln!(f, "Wind Speed: {} {}", current.wind_speed, wind_unit)?;
            writeln!(f, "{} {}", variant.glyph(), variant)?;
            if let Some(updated_at) = self.model.updated_at() {
                writeln!(f, "Updated {} UTC", updated_at.format("%H:%M"))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "7-Day Forecast")?;
        if let Some(forecast) = self.model.forecast() {
            for day in forecast.iter() {
                let variant = day.icon_variant();
                writeln!(
                    f,
                    "{:<4} Temp: {}{}  {} {:<14} {}",
                    day.label(),
                    day.temperature,
                    temp_unit,
                    variant.glyph(),
                    variant.description(),
                    icon_url(&self.options.icon_base_url, &day.icon_code)
                )?;
            }
        }

        Ok(())
    }
}

/// Render the dashboard as text.
pub fn render(model: &DashboardModel, options: &RenderOptions) -> String {
    DashboardView { model, options }.to_string()
}
