use maud::{html, Markup};

use crate::db::LeaderboardEntry;

pub fn leaderboard(entries: &[LeaderboardEntry]) -> Markup {
    html! {
        h1 { "Leaderboard" }
        @if entries.is_empty() {
            p { "Nobody has played yet. Be the first!" }
        } @else {
            p { "Top players by questions answered correctly." }
            article {
                table {
                    thead {
                        tr {
                            th { "#" }
                            th { "Player" }
                            th { "Correct" }
                            th { "Answered" }
                        }
                    }
                    tbody {
                        @for (rank, entry) in entries.iter().enumerate() {
                            tr {
                                td { (rank + 1) }
                                td { (entry.username) }
                                td { (entry.total_correct) }
                                td { (entry.total_answered) }
                            }
                        }
                    }
                }
            }
        }
    }
}
