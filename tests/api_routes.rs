#![cfg(feature = "api")]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use premstats::{
    api::{create_router, AppState},
    config::ReportsConfig,
    domain::{ActivityLog, GoalEvent, MatchFact, Player, PlayerSeasonStats, Season, Team},
    provider::{Dataset, MemoryProvider},
    services::StatsService,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const FULL_SEASON: i32 = 1;
const PARTIAL_SEASON: i32 = 2;
const EMPTY_SEASON: i32 = 3;

fn club_name(id: i32) -> String {
    format!("Club {id:02}")
}

fn fixture(id: i32, season_id: i32, home: i32, away: i32, score: Option<(i32, i32)>) -> MatchFact {
    MatchFact {
        id,
        season_id,
        home_team_id: home,
        away_team_id: away,
        home_team: club_name(home),
        away_team: club_name(away),
        home_score: score.map(|s| s.0),
        away_score: score.map(|s| s.1),
        half_time_home: None,
        half_time_away: None,
        match_date: Utc.with_ymd_and_hms(2015, 8, 8, 15, 0, 0).unwrap() + Duration::hours(id as i64),
        referee: None,
        created_at: None,
    }
}

/// 20 clubs, full double round-robin in 2015 where the lower id always wins at
/// home and every other match is drawn 0-0, so Club 01 finishes top and
/// Club 20 bottom. A second season has four matches, one unplayed.
fn dataset() -> Dataset {
    let teams: Vec<Team> = (1..=20)
        .map(|id| Team {
            id,
            name: club_name(id),
            short_name: format!("C{id:02}"),
            stadium: None,
            founded: None,
        })
        .collect();

    let mut matches = Vec::new();
    let mut next_id = 1;
    for home in 1..=20 {
        for away in 1..=20 {
            if home == away {
                continue;
            }
            let score = if home < away { (1, 0) } else { (0, 0) };
            matches.push(fixture(next_id, FULL_SEASON, home, away, Some(score)));
            next_id += 1;
        }
    }
    let first_partial = next_id;
    matches.push(fixture(next_id, PARTIAL_SEASON, 1, 2, Some((0, 3))));
    matches.push(fixture(next_id + 1, PARTIAL_SEASON, 3, 1, Some((2, 2))));
    matches.push(fixture(next_id + 2, PARTIAL_SEASON, 2, 3, Some((1, 0))));
    matches.push(fixture(next_id + 3, PARTIAL_SEASON, 4, 1, None));

    let goals = (0..3)
        .map(|i| GoalEvent {
            id: i + 1,
            match_id: first_partial,
            player_id: Some(10),
            created_at: None,
        })
        .collect();

    let season = |id: i32, year: i32| Season {
        id,
        name: format!("{}/{:02}", year, (year + 1) % 100),
        year,
        created_at: None,
    };

    let stats = |player_id: i32, name: &str, goals: i32, assists: i32| PlayerSeasonStats {
        player_id,
        player_name: name.to_string(),
        season_id: FULL_SEASON,
        team_id: 1,
        team_name: club_name(1),
        appearances: 38,
        goals,
        assists,
        nationality: None,
        position: Some("Forward".to_string()),
    };

    Dataset {
        teams,
        seasons: vec![season(FULL_SEASON, 2015), season(PARTIAL_SEASON, 2016), season(EMPTY_SEASON, 1993)],
        matches,
        goals,
        players: vec![
            Player {
                id: 10,
                name: "Harry Kane".to_string(),
                date_of_birth: None,
                nationality: Some("England".to_string()),
                position: Some("Forward".to_string()),
            },
            Player {
                id: 11,
                name: "Sergio Aguero".to_string(),
                date_of_birth: None,
                nationality: Some("Argentina".to_string()),
                position: Some("Forward".to_string()),
            },
            Player {
                id: 12,
                name: "Mesut Ozil".to_string(),
                date_of_birth: None,
                nationality: Some("Germany".to_string()),
                position: Some("Midfielder".to_string()),
            },
        ],
        player_stats: vec![
            stats(11, "Sergio Aguero", 24, 2),
            stats(10, "Harry Kane", 25, 1),
            stats(12, "Mesut Ozil", 6, 19),
            stats(13, "Petr Cech", 0, 0),
            PlayerSeasonStats {
                season_id: PARTIAL_SEASON,
                team_id: 2,
                team_name: club_name(2),
                appearances: 3,
                ..stats(10, "Harry Kane", 3, 0)
            },
        ],
        activity: vec![ActivityLog {
            date: Utc::now() - Duration::days(1),
            activity: "Goal Import".to_string(),
            season: "2016/17".to_string(),
            details: "Goals added to Club 01 vs Club 02".to_string(),
            goals_added: 3,
            source: "Data Import".to_string(),
        }],
    }
}

fn app() -> Router {
    let provider = Arc::new(MemoryProvider::new(dataset()));
    let service = Arc::new(StatsService::new(provider, ReportsConfig::default()));
    create_router(AppState::new(service))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request");

    let response = app().oneshot(request).await.expect("router request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body: Value = serde_json::from_slice(&bytes).expect("response body is not JSON");

    (status, body)
}

#[tokio::test]
async fn health_reports_service() {
    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["database"], "connected");
}

#[tokio::test]
async fn standings_are_ranked_with_dense_positions() {
    let (status, body) = get("/api/v1/standings?season=1").await;
    assert_eq!(status, StatusCode::OK);

    let table = body["data"]["table"].as_array().expect("table array");
    assert_eq!(table.len(), 20);
    assert_eq!(table[0]["team"], "Club 01");
    assert_eq!(table[0]["points"], 3 * 19 + 19);
    assert_eq!(table[19]["team"], "Club 20");
    for (i, row) in table.iter().enumerate() {
        assert_eq!(row["position"], i as u64 + 1);
        assert_eq!(row["played"], 38);
    }
}

#[tokio::test]
async fn standings_path_matches_query_form() {
    let (_, by_query) = get("/api/v1/standings?season=2").await;
    let (status, by_path) = get("/api/v1/standings/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_query, by_path);

    let table = by_path["data"]["table"].as_array().expect("table array");
    // every club that appears in the season has a row, even Club 04 with no result
    assert_eq!(table.len(), 4);
    assert_eq!(table[0]["team"], "Club 02");
    assert_eq!(table[3]["team"], "Club 04");
    assert_eq!(table[3]["played"], 0);
}

#[tokio::test]
async fn standings_without_season_lists_available_seasons() {
    let (status, body) = get("/api/v1/standings").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .expect("season list")
        .iter()
        .filter_map(|s| s["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let (_, seasons) = get("/api/v1/standings/seasons").await;
    assert_eq!(seasons, body);
}

#[tokio::test]
async fn unknown_and_invalid_ids_map_to_error_envelopes() {
    let (status, body) = get("/api/v1/standings/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Season with ID 99 not found");

    let (status, body) = get("/api/v1/standings?season=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = get("/api/v1/teams/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get("/api/v1/matches?limit=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn team_season_stats() {
    let (status, body) = get("/api/v1/standings/team/2/season/2").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["team"], "Club 02");
    assert_eq!(data["matchesPlayed"], 2);
    assert_eq!(data["wins"], 2);
    assert_eq!(data["points"], 6);
    assert_eq!(data["pointsPerGame"], 3.0);
}

#[tokio::test]
async fn partial_season_summary_omits_relegation() {
    let (status, body) = get("/api/v1/seasons/2/summary").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["totalMatches"], 3);
    assert_eq!(data["totalGoals"], 8);
    assert_eq!(data["champion"], "Club 02");
    assert!(data.get("relegated").is_none());
}

#[tokio::test]
async fn full_season_summary_lists_relegated_clubs() {
    let (status, body) = get("/api/v1/seasons/1/summary").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["totalMatches"], 380);
    assert_eq!(data["champion"], "Club 01");
    assert_eq!(
        data["relegated"],
        serde_json::json!(["Club 20", "Club 19", "Club 18"])
    );
}

#[tokio::test]
async fn empty_season_summary_is_zeroed() {
    let (status, body) = get("/api/v1/seasons/3/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalMatches"], 0);
    assert_eq!(body["data"]["avgGoalsPerMatch"], 0.0);
    assert!(body["data"].get("champion").is_none());
}

#[tokio::test]
async fn matches_filter_and_status() {
    let (status, body) = get("/api/v1/matches?season=2&team=1").await;
    assert_eq!(status, StatusCode::OK);

    let matches = body["data"].as_array().expect("match list");
    assert_eq!(matches.len(), 3);
    let unplayed: Vec<&Value> = matches.iter().filter(|m| m["homeScore"].is_null()).collect();
    assert_eq!(unplayed.len(), 1);
    assert_eq!(unplayed[0]["status"], "pending");
    assert!(matches
        .iter()
        .filter(|m| !m["homeScore"].is_null())
        .all(|m| m["status"] == "completed"));

    let (_, page) = get("/api/v1/matches?season=1&limit=5&offset=5").await;
    assert_eq!(page["data"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn top_scorers_ranked_and_limited() {
    let (status, body) = get("/api/v1/stats/top-scorers?season=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["seasonId"], 1);
    assert_eq!(data["limit"], 2);
    let scorers = data["topScorers"].as_array().expect("scorer list");
    assert_eq!(scorers.len(), 2);
    assert_eq!(scorers[0]["playerName"], "Harry Kane");
    assert_eq!(scorers[0]["rank"], 1);
    assert_eq!(scorers[1]["playerName"], "Sergio Aguero");
}

#[tokio::test]
async fn players_search_is_case_insensitive() {
    let (status, body) = get("/api/v1/players?search=KANE").await;
    assert_eq!(status, StatusCode::OK);
    let players = body["data"].as_array().expect("player list");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["id"], 10);

    let (_, body) = get("/api/v1/players?position=forward").await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let (status, _) = get("/api/v1/players/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn data_completeness_report() {
    let (status, body) = get("/api/v1/reports/data-completeness").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    let seasons = data["seasonData"].as_array().expect("season data");
    let years: Vec<i64> = seasons.iter().filter_map(|s| s["year"].as_i64()).collect();
    assert_eq!(years, vec![1993, 2015, 2016]);

    let partial = &seasons[2];
    assert_eq!(partial["totalMatches"], 4);
    assert_eq!(partial["matchesWithScores"], 3);
    assert_eq!(partial["matchesWithGoals"], 1);
    assert_eq!(partial["goalCompleteness"], 25.0);
    assert_eq!(partial["qualityLevel"], "Minimal");

    assert_eq!(seasons[0]["qualityLevel"], "No Data");
    assert_eq!(seasons[0]["expectedMatches"], 462);

    let eras: Vec<&str> = data["eraStats"]
        .as_array()
        .expect("era stats")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(
        eras,
        vec!["Early Premier League", "Golden Era", "Modern Era", "Recent Era"]
    );

    assert_eq!(data["bestSeasons"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["recentActivity"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["overallStats"]["totalSeasons"], 3);
}

#[tokio::test]
async fn season_completeness_by_year() {
    let (status, body) = get("/api/v1/reports/season-completeness?year=2015").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalMatches"], 380);
    assert_eq!(body["data"]["seasonProgress"], 100.0);

    let (status, _) = get("/api/v1/reports/season-completeness").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/v1/reports/season-completeness?year=1980").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_standings_alias() {
    let (status, alias) = get("/api/v1/stats/standings?season=1").await;
    assert_eq!(status, StatusCode::OK);
    let (_, canonical) = get("/api/v1/standings?season=1").await;
    assert_eq!(alias, canonical);
}

#[tokio::test]
async fn season_teams() {
    let (status, body) = get("/api/v1/seasons/2/teams").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("team list")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Club 01", "Club 02", "Club 03", "Club 04"]);

    let (status, _) = get("/api/v1/seasons/99/teams").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn matches_by_season_in_kickoff_order() {
    let (status, body) = get("/api/v1/matches/season/2").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["seasonId"], 2);
    assert_eq!(data["pagination"]["limit"], 50);
    assert_eq!(data["pagination"]["offset"], 0);
    let ids: Vec<i64> = data["matches"]
        .as_array()
        .expect("match list")
        .iter()
        .filter_map(|m| m["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![381, 382, 383, 384]);

    let (_, page) = get("/api/v1/matches/season/1?limit=10&offset=370").await;
    let ids: Vec<i64> = page["data"]["matches"]
        .as_array()
        .expect("match list")
        .iter()
        .filter_map(|m| m["id"].as_i64())
        .collect();
    assert_eq!(ids, (371..=380).collect::<Vec<i64>>());

    let (status, _) = get("/api/v1/matches/season/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get("/api/v1/matches/season/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn match_events_list_goals() {
    let (status, body) = get("/api/v1/matches/381/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["matchId"], 381);
    let events = body["data"]["events"].as_array().expect("event list");
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e["playerId"] == 10));

    let (_, body) = get("/api/v1/matches/1/events").await;
    assert_eq!(body["data"]["events"].as_array().map(Vec::len), Some(0));

    let (status, _) = get("/api/v1/matches/9999/events").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn player_positions_and_nationalities() {
    let (status, body) = get("/api/v1/players/positions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["positions"],
        serde_json::json!(["Forward", "Midfielder"])
    );

    let (status, body) = get("/api/v1/players/nationalities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["nationalities"],
        serde_json::json!(["Argentina", "England", "Germany"])
    );
}

#[tokio::test]
async fn player_season_stats_newest_first() {
    let (status, body) = get("/api/v1/players/10/stats").await;
    assert_eq!(status, StatusCode::OK);
    let seasons: Vec<i64> = body["data"]
        .as_array()
        .expect("stats list")
        .iter()
        .filter_map(|r| r["seasonId"].as_i64())
        .collect();
    assert_eq!(seasons, vec![2, 1]);

    let (_, body) = get("/api/v1/players/10/stats?season=1").await;
    assert_eq!(body["data"][0]["goals"], 25);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (_, body) = get("/api/v1/players/12/stats?season=2").await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let (status, _) = get("/api/v1/players/99/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_players_and_teams() {
    let (status, body) = get("/api/v1/search?q=o").await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["query"], "o");
    assert_eq!(data["count"], 2);
    assert_eq!(data["results"][0]["type"], "player");
    assert_eq!(data["results"][0]["name"], "Mesut Ozil");
    assert_eq!(data["results"][1]["name"], "Sergio Aguero");

    let (_, body) = get("/api/v1/search?q=CLUB&limit=5").await;
    let results = body["data"]["results"].as_array().expect("result list");
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r["type"] == "team"));
    assert_eq!(results[0]["name"], "Club 01");

    let (status, body) = get("/api/v1/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");
    let (status, _) = get("/api/v1/search?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
