use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ece_core::{ics, CalendarGenerator, TokenGroups};
use log::debug;
use serde::Deserialize;

/// Each parameter is split on whitespace into the tokens of its group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    name: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    duration: Option<String>,
    link: Option<String>,
}

impl From<&QueryParams> for TokenGroups {
    fn from(value: &QueryParams) -> Self {
        let group = |param: &Option<String>| -> Vec<String> {
            param
                .iter()
                .flat_map(|param| param.split_whitespace())
                .map(String::from)
                .collect()
        };
        TokenGroups {
            name: group(&value.name),
            date: group(&value.date),
            time: group(&value.time),
            location: group(&value.location),
            duration: group(&value.duration),
            link: group(&value.link),
        }
    }
}

pub fn handle(
    tokens: &TokenGroups,
    generator: &CalendarGenerator,
) -> Result<Response, (StatusCode, String)> {
    debug!("calendar for {tokens:?}");
    let ical_calendar = generator
        .create_calendar(tokens)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    let body = ics::generate(&ical_calendar);
    let response = ([(CONTENT_TYPE, "text/calendar")], body).into_response();
    Ok(response)
}

/// Handle calendar requests with the tokens in the query string.
pub async fn handler(
    State(generator): State<Arc<CalendarGenerator>>,
    Query(query_params): Query<QueryParams>,
) -> Result<Response, (StatusCode, String)> {
    handle(&TokenGroups::from(&query_params), &generator)
}

/// Handle calendar requests with the token groups as JSON body.
pub async fn json_handler(
    State(generator): State<Arc<CalendarGenerator>>,
    Json(tokens): Json<TokenGroups>,
) -> Result<Response, (StatusCode, String)> {
    handle(&tokens, &generator)
}

#[cfg(test)]
mod tests {
    use axum::body::HttpBody;
    use ece_core::Settings;

    use super::*;

    fn generator() -> State<Arc<CalendarGenerator>> {
        State(Arc::new(CalendarGenerator::new(Settings::default())))
    }

    async fn body(response: Response) -> String {
        let mut body = response.into_body();
        let mut bytes = vec![];
        while let Some(chunk) = body.data().await {
            bytes.extend_from_slice(&chunk.unwrap());
        }
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_from_query_params_for_token_groups() {
        let query_params = QueryParams {
            name: Some(String::from("Team Meeting")),
            date: Some(String::from("16. April")),
            time: Some(String::from(" ")),
            link: Some(String::from("http://x")),
            ..QueryParams::default()
        };
        let tokens = TokenGroups::from(&query_params);
        assert_eq!(tokens.name, vec!["Team", "Meeting"]);
        assert_eq!(tokens.date, vec!["16.", "April"]);
        assert!(tokens.time.is_empty());
        assert_eq!(tokens.link, vec!["http://x"]);
        assert!(tokens.location.is_empty());
    }

    #[tokio::test]
    async fn test_handler() {
        let query_params = QueryParams {
            name: Some(String::from("Team Meeting")),
            date: Some(String::from("Montags")),
            time: Some(String::from("16 Uhr")),
            ..QueryParams::default()
        };
        let response = handler(generator(), Query(query_params)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/calendar");
        let body = body(response).await;
        assert!(body.contains("SUMMARY:Team|Meeting\r\n"));
        assert!(body.contains("RRULE:FREQ=WEEKLY;COUNT=4\r\n"));
        assert!(body.contains("T160000\r\n"));
    }

    #[tokio::test]
    async fn test_json_handler() {
        let tokens = TokenGroups {
            name: vec![String::from("Konzert, live")],
            date: vec![String::from("24.12.25")],
            time: vec![String::from("19"), String::from("Uhr")],
            location: vec![String::from("Marktplatz")],
            ..TokenGroups::default()
        };
        let response = json_handler(generator(), Json(tokens)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/calendar");
        let body = body(response).await;
        assert!(body.contains("BEGIN:VEVENT\r\n"));
        assert!(body.contains("SUMMARY:Konzert\\, live\r\n"));
        assert!(body.contains("DTSTART;TZID=Europe/Berlin:20251224T190000\r\n"));
        assert!(body.contains("LOCATION:Marktplatz\r\n"));
        assert!(!body.contains("RRULE"));
    }

    #[tokio::test]
    async fn test_json_handler_invalid_settings() {
        let settings = Settings {
            recurrence_count: 0,
            ..Settings::default()
        };
        let generator = State(Arc::new(CalendarGenerator::new(settings)));
        let result = json_handler(generator, Json(TokenGroups::default())).await;
        let Err((status, message)) = result else {
            panic!("invalid settings must be rejected");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("recurrence count"));
    }
}
