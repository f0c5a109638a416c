use pizza_delivery::{Cell, GameState, Mode, Phase, Question, Swatch, Team, BOARD_SIZE, PALETTE, TEAMS};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Panel, OPTION_KEYS};

const CELL_WIDTH: u16 = 4;

const BOARD_WIDGET_WIDTH: u16 = CELL_WIDTH * BOARD_SIZE as u16 + 2;

const BOARD_WIDGET_HEIGHT: u16 = BOARD_SIZE as u16 * 2 + 2;

const SCOREBOARD_WIDTH: u16 = 28;

fn swatch_color(swatch: Swatch) -> Color {
    let (r, g, b) = swatch.rgb();
    Color::Rgb(r, g, b)
}

fn team_span(state: &GameState, team: Team) -> Span<'static> {
    Span::styled(
        state.roster().name(team).to_string(),
        Style::new()
            .fg(swatch_color(state.roster().swatch(team)))
            .add_modifier(Modifier::BOLD),
    )
}

pub fn draw(frame: &mut Frame, app: &App) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(3),
            Constraint::Min(BOARD_WIDGET_HEIGHT),
            Constraint::Length(3),
        ],
    )
    .split(frame.size());

    frame.render_widget(turn_header(&app.state), main_layout[0]);

    let body = Layout::new(
        Direction::Horizontal,
        [
            Constraint::Length(SCOREBOARD_WIDTH),
            Constraint::Length(BOARD_WIDGET_WIDTH),
            Constraint::Min(30),
        ],
    )
    .split(main_layout[1]);

    frame.render_widget(scoreboard(&app.state), body[0]);
    frame.render_widget(BoardWidget { app }, body[1]);
    let side_panel = if app.state.is_finished() {
        game_over_panel(&app.state)
    } else {
        question_panel(&app.state, app.load_error.as_deref())
    };
    frame.render_widget(side_panel, body[2]);

    frame.render_widget(footer(app), main_layout[2]);

    if let Panel::TeamConfig {
        team,
        swatch_idx,
        editing_name,
    } = app.panel
    {
        let area = centered(frame.size(), 60, 14);
        frame.render_widget(Clear, area);
        frame.render_widget(team_config(&app.state, team, swatch_idx, editing_name), area);
    }
}

fn turn_header(state: &GameState) -> Paragraph<'static> {
    let line = match state.current_team() {
        Some(team) => Line::from(vec![Span::raw("Turn of team: "), team_span(state, team)]),
        None => Line::from("Press 1-4 to pick the team that answers"),
    };
    Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Pizza Delivery"))
}

fn scoreboard(state: &GameState) -> Paragraph<'static> {
    let mut lines = Vec::new();
    for team in TEAMS {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::new().fg(swatch_color(state.roster().swatch(team)))),
            Span::raw(format!("{}. ", team.index() + 1)),
            team_span(state, team),
            Span::raw(format!(": {}", state.score(team))),
        ]));
    }
    if !state.board().obstacles.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(format!("Obstacles: {}", state.board().obstacles.len())));
    }
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Score"))
}

struct BoardWidget<'a> {
    app: &'a App,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded);
        let inner = block.inner(area);
        block.render(area, buf);

        let state = &self.app.state;
        let valid_moves = state.valid_moves();
        for cell in Cell::all() {
            let x = inner.x + cell.col as u16 * CELL_WIDTH;
            let y = inner.y + cell.row as u16 * 2;
            if x + CELL_WIDTH > inner.right() || y >= inner.bottom() {
                continue;
            }
            let teams: Vec<Team> = state.teams_at(cell).collect();
            let (symbol, mut style) = match teams.first() {
                Some(&team) => {
                    let symbol = if teams.len() > 1 {
                        format!("{}🚗", teams.len())
                    } else {
                        String::from(" 🚗")
                    };
                    (symbol, Style::new().bg(swatch_color(state.roster().swatch(team))))
                }
                None if state.board().is_obstacle(cell) => {
                    (String::from("███"), Style::new().fg(Color::DarkGray))
                }
                None if state.board().is_delivery(cell) => (String::from(" 🍕"), Style::new()),
                None => (String::from(" · "), Style::new().fg(Color::Gray)),
            };
            if valid_moves.contains(cell) {
                style = style.bg(Color::Rgb(0x40, 0x60, 0x40));
            }
            if cell == self.app.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf.set_string(x, y, symbol, style);
        }
    }
}

fn question_panel(state: &GameState, load_error: Option<&str>) -> Paragraph<'static> {
    let mut lines: Vec<Line> = Vec::new();
    let title = match state.mode() {
        Mode::Free => String::from("Free mode"),
        Mode::Quiz => format!(
            "Question {} of {}",
            state.question_cursor() + 1,
            state.questions().len()
        ),
    };
    match (state.phase(), state.current_question()) {
        (Phase::WaitingForQuestions, _) => match load_error {
            Some(error) => {
                lines.push(Line::styled(
                    "Loading questions failed:",
                    Style::new().fg(Color::LightRed),
                ));
                lines.push(Line::from(error.to_string()));
                lines.push(Line::default());
                lines.push(Line::from("[q] quit"));
            }
            None => lines.push(Line::from("Waiting for questions...")),
        },
        (Phase::Moving, _) => {
            lines.push(Line::from("Correct! Move one step with the arrow keys and Enter."));
        }
        (_, None) => {
            lines.push(Line::from("Move your team freely."));
            lines.push(Line::from("[y] yes   [n] no"));
        }
        (_, Some(question)) => {
            lines.push(Line::from(question.text().to_string()));
            lines.push(Line::default());
            match question {
                Question::MultipleChoice { options, .. } => {
                    for (key, option) in OPTION_KEYS.iter().zip(options) {
                        lines.push(Line::from(format!("[{}] {}", key, option)));
                    }
                }
                Question::Open { answer, .. } => {
                    if state.is_answer_revealed(state.question_cursor()) {
                        lines.push(Line::from(vec![
                            Span::styled("Answer: ", Style::new().add_modifier(Modifier::BOLD)),
                            Span::raw(answer.clone()),
                        ]));
                        lines.push(Line::from("Was it right? [y] yes   [n] no"));
                    } else {
                        lines.push(Line::from("[s] show answer"));
                    }
                }
            }
        }
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title))
}

fn game_over_panel(state: &GameState) -> Paragraph<'static> {
    let winners = state.winners();
    let mut lines = Vec::new();
    if let [winner] = winners.as_slice() {
        lines.push(Line::from(vec![
            Span::raw("🎉 Team "),
            team_span(state, *winner),
            Span::raw(format!(" wins with {} points.", state.score(*winner))),
        ]));
    } else {
        lines.push(Line::from("🤝 It's a tie between:"));
        for &team in &winners {
            lines.push(Line::from(vec![
                Span::raw("  "),
                team_span(state, team),
                Span::raw(format!(" with {} points", state.score(team))),
            ]));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from("[r] restart"));
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Game over"))
}

fn footer(app: &App) -> Paragraph<'static> {
    let text = match &app.notice {
        Some(notice) => Line::styled(notice.clone(), Style::new().fg(Color::LightRed)),
        None => Line::from(match app.panel {
            Panel::Board => "arrows move cursor · Enter move · 1-4 pick team · Tab teams · q quit",
            Panel::TeamConfig { editing_name: true, .. } => "type the name · Enter done",
            Panel::TeamConfig { .. } => {
                "↑↓ team · ←→ color · Enter pick color · e edit name · Esc close"
            }
        }),
    };
    Paragraph::new(text).block(Block::default().borders(Borders::ALL))
}

fn team_config(state: &GameState, selected: Team, swatch_idx: usize, editing_name: bool) -> Paragraph<'static> {
    let mut lines = Vec::new();
    for team in TEAMS {
        let marker = if team == selected { "▶ " } else { "  " };
        let mut name = state.roster().name(team).to_string();
        if team == selected && editing_name {
            name.push('▏');
        }
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled("■ ", Style::new().fg(swatch_color(state.roster().swatch(team)))),
            Span::raw(name),
        ]));
    }
    lines.push(Line::default());

    let mut swatches = vec![Span::raw("  ")];
    for (idx, swatch) in PALETTE.into_iter().enumerate() {
        let mut style = Style::new().fg(swatch_color(swatch));
        let taken = matches!(state.roster().owner_of(swatch), Some(owner) if owner != selected);
        if taken {
            style = style.add_modifier(Modifier::DIM);
        }
        if idx == swatch_idx {
            style = style.add_modifier(Modifier::REVERSED);
        }
        swatches.push(Span::styled(if taken { "▒▒" } else { "██" }, style));
        swatches.push(Span::raw(" "));
    }
    lines.push(Line::from(swatches));
    lines.push(Line::from(format!("  {}", PALETTE[swatch_idx].css())));

    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Teams"))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use pizza_delivery::{GameConfig, Variant};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    use super::*;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_turn_and_scores() {
        let app = App::new(GameConfig::new(Variant::Classic), Mode::Free, StdRng::seed_from_u64(1));
        let screen = render(&app);
        assert!(screen.contains("Turn of team:"));
        assert!(screen.contains("Team 4: 0"));
        assert!(screen.contains("Free mode"));
    }

    #[test]
    fn selection_variant_asks_for_a_team() {
        let app = App::new(GameConfig::new(Variant::Obstacles), Mode::Quiz, StdRng::seed_from_u64(1));
        let screen = render(&app);
        assert!(screen.contains("Press 1-4"));
        assert!(screen.contains("Waiting for questions"));
    }

    #[test]
    fn failed_fetch_is_not_shown_as_waiting() {
        let mut app = App::new(GameConfig::new(Variant::Classic), Mode::Quiz, StdRng::seed_from_u64(1));
        app.questions_failed(String::from("timed out"));
        let screen = render(&app);
        assert!(screen.contains("Loading questions failed"));
        assert!(screen.contains("timed out"));
        assert!(!screen.contains("Waiting for questions"));
    }
}
