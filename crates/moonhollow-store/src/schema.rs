//! Database schema, applied at API startup.

/// SQL to create the games table.
pub const CREATE_GAMES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS games (
    id          UUID PRIMARY KEY,
    document    JSONB NOT NULL,
    is_active   BOOLEAN NOT NULL,
    human_name  TEXT NOT NULL,
    day         BIGINT NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_games_active
    ON games (is_active, updated_at DESC);
";

/// SQL to create the players table.
pub const CREATE_PLAYERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS players (
    id       UUID PRIMARY KEY,
    game_id  UUID NOT NULL,
    document JSONB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_players_game_id
    ON players (game_id);
";

/// SQL to create the transcript messages table.
pub const CREATE_MESSAGES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS messages (
    channel  TEXT NOT NULL,
    ts       BIGINT NOT NULL,
    seq      BIGINT NOT NULL,
    document JSONB NOT NULL,
    PRIMARY KEY (channel, seq)
);

CREATE INDEX IF NOT EXISTS idx_messages_channel_order
    ON messages (channel, ts, seq);
";
