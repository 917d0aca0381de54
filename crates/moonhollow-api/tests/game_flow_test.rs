//! End-to-end flow over the HTTP surface: creation, introductions, chat,
//! the two-round vote, one night, and deletion.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, get_json, post_json, send_delete};
use serde_json::json;

fn generation_reply() -> String {
    let players: Vec<serde_json::Value> = ["Ash", "Brier", "Carden", "Dell", "Ember"]
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "backstory": format!("{name} grew up by the mill"),
                "temperament": "wary",
            })
        })
        .collect();
    json!({
        "game_scene": "Lanterns gutter over the square.",
        "players": players,
    })
    .to_string()
}

#[tokio::test]
async fn test_full_day_cycle_over_http() {
    let (app, model) = build_test_app();

    // Create. Identity RNG deals [Werewolf, Werewolf, Doctor, Detective,
    // Villager] to the bots in cast order and Villager to the human.
    model.push_reply(generation_reply());
    let (status, body) = post_json(
        app.clone(),
        "/api/v1/games",
        &json!({
            "human_name": "Mara",
            "theme": "a mill town under late snow",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["story"], "Lanterns gutter over the square.");
    assert_eq!(body["phase"], "day discussion");
    assert_eq!(body["day"], 1);
    assert_eq!(body["human"]["name"], "Mara");
    assert_eq!(body["human"]["role"], "Villager");
    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 5);
    // Bot roles must not appear in the response.
    assert!(players[0].get("role").is_none());
    let id = body["id"].as_str().unwrap().to_owned();

    // Introductions from every bot, in cast order.
    for _ in 0..5 {
        model.push_reply("Well met.");
    }
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/welcome-all"),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0]["name"], "Ash");

    // Chat: the arbiter routes the floor.
    model.push_reply(r#"{"players_to_reply": ["Ash", "Brier"]}"#);
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/chat"),
        &json!({"message": "Who seems suspicious to you?"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["players_to_reply"], json!(["Ash", "Brier"]));

    model.push_reply("I was at the mill all night.");
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/chat/Ash"),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ash");
    assert_eq!(body["text"], "I was at the mill all night.");

    // Round One: all five bots vote Ash, the human votes Brier.
    for _ in 0..5 {
        model.push_reply(r#"{"player_to_eliminate": "Ash", "reason": "too quiet"}"#);
    }
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/voting/start"),
        &json!({"ballot": {"player_to_eliminate": "Brier", "reason": "a hunch"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leaders"], json!(["Ash", "Brier"]));

    // Defence.
    model.push_reply("You have the wrong man.");
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/voting/defence"),
        &json!({"name": "Ash"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "You have the wrong man.");

    // Round Two: the non-leader bots Carden, Dell, Ember vote Ash, as does
    // the human. Ash was dealt Werewolf.
    for _ in 0..3 {
        model.push_reply(r#"{"player_to_eliminate": "Ash", "reason": "the defence rang hollow"}"#);
    }
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/voting/result"),
        &json!({"ballot": {"player_to_eliminate": "Ash", "reason": "no alibi"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eliminated"], "Ash");
    assert_eq!(body["eliminated_role"], "Werewolf");
    assert!(body["verdict"].is_null());

    // Night: Carden saves Dell, Brier kills Ember, Dell investigates Brier.
    // The human is a Villager, so the request carries no action.
    model.push_reply(r#"{"target": "Dell", "reason": "they drew attention today"}"#);
    model.push_reply(r#"{"target": "Ember", "reason": "alone at the edge of town"}"#);
    model.push_reply(r#"{"target": "Brier", "reason": "the vote split oddly"}"#);
    let (status, body) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/night"),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["victim"], "Ember");
    assert_eq!(body["kill_prevented"], false);
    assert!(body["verdict"].is_null());
    // The investigation went to the bot Detective, never the human client.
    assert!(body["detective_finding"].is_null());

    // Morning of day two.
    let (status, body) = get_json(app.clone(), &format!("/api/v1/games/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "day discussion");
    assert_eq!(body["day"], 2);
    assert!(body["dead_roster"].as_str().unwrap().contains("Ash (Werewolf)"));
    assert!(body["dead_roster"].as_str().unwrap().contains("Ember (Villager)"));
    let alive: Vec<bool> = body["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["is_alive"].as_bool().unwrap())
        .collect();
    assert_eq!(alive, vec![false, true, true, true, false]);

    // Listing and deletion.
    let (status, body) = get_json(app.clone(), "/api/v1/games").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Mara");

    let status = send_delete(app.clone(), &format!("/api/v1/games/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get_json(app, &format!("/api/v1/games/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_unknown_game_returns_not_found() {
    let (app, _model) = build_test_app();

    let (status, body) = get_json(
        app,
        "/api/v1/games/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_chat_outside_day_discussion_conflicts() {
    let (app, model) = build_test_app();

    model.push_reply(generation_reply());
    let (_, body) = post_json(
        app.clone(),
        "/api/v1/games",
        &json!({"human_name": "Mara", "theme": "a mill town"}),
    )
    .await;
    let id = body["id"].as_str().unwrap().to_owned();

    for _ in 0..5 {
        model.push_reply(r#"{"player_to_eliminate": "Ash", "reason": "too quiet"}"#);
    }
    let (status, _) = post_json(
        app.clone(),
        &format!("/api/v1/games/{id}/voting/start"),
        &json!({"ballot": {"player_to_eliminate": "Brier"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Day discussion is over; the phase check fires before any model call.
    let (status, body) = post_json(
        app,
        &format!("/api/v1/games/{id}/chat"),
        &json!({"message": "wait"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_phase");
}
