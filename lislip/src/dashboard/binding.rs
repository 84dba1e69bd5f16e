//! Page objects tying UI slots to the dashboard initializers

use crate::config::{AdvisorConfig, DashboardConfig};

use super::advisor::{LOADING_MESSAGE, get_advice};
use super::air_quality::load_air_quality_card;
use super::card::{Card, CardSlot, TextSlot};
use super::earthquake::load_earthquake_card;
use super::fetch::DataFetcher;
use super::weather::load_weather_card;

/// The hazard dashboard; cards whose slot is absent are not fetched
#[derive(Default)]
pub struct DashboardPage<'a> {
    pub earthquake: Option<&'a mut dyn CardSlot>,
    pub weather: Option<&'a mut dyn CardSlot>,
    pub air_quality: Option<&'a mut dyn CardSlot>,
}

impl DashboardPage<'_> {
    /// Load every present card concurrently and render the results
    pub async fn initialize(self, fetcher: &dyn DataFetcher, config: &DashboardConfig) {
        let (earthquake, weather, air_quality) = tokio::join!(
            load_if_present(self.earthquake.is_some(), load_earthquake_card(fetcher, config)),
            load_if_present(self.weather.is_some(), load_weather_card(fetcher, config)),
            load_if_present(self.air_quality.is_some(), load_air_quality_card(fetcher, config)),
        );

        render(self.earthquake, earthquake);
        render(self.weather, weather);
        render(self.air_quality, air_quality);
    }
}

async fn load_if_present<F>(present: bool, load: F) -> Option<Card>
where
    F: Future<Output = Card>,
{
    if present { Some(load.await) } else { None }
}

fn render(slot: Option<&mut dyn CardSlot>, card: Option<Card>) {
    if let (Some(slot), Some(card)) = (slot, card) {
        slot.render(card);
    }
}

/// The "ask the advisor" form
pub struct AdvisorPanel<'a> {
    pub response_area: &'a mut dyn TextSlot,
}

impl<'a> AdvisorPanel<'a> {
    pub fn new(response_area: &'a mut dyn TextSlot) -> Self {
        Self { response_area }
    }

    pub async fn submit(
        &mut self,
        question: &str,
        fetcher: &dyn DataFetcher,
        config: &AdvisorConfig,
    ) {
        if !question.trim().is_empty() {
            self.response_area.set_text(LOADING_MESSAGE);
        }
        let advice = get_advice(fetcher, config, question).await;
        self.response_area.set_text(&advice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{
        AIR_QUALITY_UNAVAILABLE, EMPTY_PROMPT_MESSAGE, ExternalServiceError,
    };
    use crate::test_utils::{MockFetcher, test_dashboard_config};
    use serde_json::json;

    fn quake_feed() -> serde_json::Value {
        json!({
            "data": [{
                "magnitude": {"value": 2.9},
                "location": "Bago City",
                "time": {"utc": "2024-05-01 12:00:00"}
            }]
        })
    }

    #[tokio::test]
    async fn test_initialize_renders_each_card_independently() {
        let fetcher = MockFetcher::new()
            .respond("/earthquakes", Ok(quake_feed()))
            .respond(
                "/forecast",
                Ok(json!({"current": {"wind_speed_10m": 70.0, "weather_code": 95}})),
            )
            .respond("/air-quality", Err(ExternalServiceError::Status(500)));

        let mut earthquake: Option<Card> = None;
        let mut weather: Option<Card> = None;
        let mut air_quality: Option<Card> = None;

        DashboardPage {
            earthquake: Some(&mut earthquake),
            weather: Some(&mut weather),
            air_quality: Some(&mut air_quality),
        }
        .initialize(&fetcher, &test_dashboard_config())
        .await;

        assert!(matches!(
            earthquake,
            Some(Card::Ready { ref heading, .. }) if heading == "Recent Quake: M 2.9"
        ));
        assert!(matches!(
            weather,
            Some(Card::Ready { status: Some("status-danger"), .. })
        ));
        assert_eq!(air_quality, Some(Card::unavailable(AIR_QUALITY_UNAVAILABLE)));
    }

    #[tokio::test]
    async fn test_missing_slots_are_not_fetched() {
        let fetcher = MockFetcher::new().respond("/earthquakes", Ok(quake_feed()));
        let mut earthquake: Option<Card> = None;

        DashboardPage {
            earthquake: Some(&mut earthquake),
            ..Default::default()
        }
        .initialize(&fetcher, &test_dashboard_config())
        .await;

        assert!(earthquake.is_some());
        let calls = fetcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path(), "/earthquakes");
    }

    #[tokio::test]
    async fn test_advisor_panel_shows_loading_then_advice() {
        let path = "/v1beta/models/gemini-2.0-flash:generateContent";
        let fetcher = MockFetcher::new().respond(
            path,
            Ok(json!({
                "candidates": [{"content": {"parts": [{"text": "Move to higher ground."}]}}]
            })),
        );
        let config = AdvisorConfig {
            api_url: format!("http://mock.test{path}").parse().unwrap(),
            api_key: "k".to_string(),
        };

        let mut history: Vec<String> = Vec::new();
        AdvisorPanel::new(&mut history)
            .submit("Flash flood?", &fetcher, &config)
            .await;

        assert_eq!(history, vec![LOADING_MESSAGE, "Move to higher ground."]);
    }

    #[tokio::test]
    async fn test_advisor_panel_blank_question() {
        let fetcher = MockFetcher::new();
        let config = AdvisorConfig::new("k");

        let mut area = String::new();
        AdvisorPanel::new(&mut area).submit("", &fetcher, &config).await;

        assert_eq!(area, EMPTY_PROMPT_MESSAGE);
        assert!(fetcher.calls().is_empty());
    }
}
