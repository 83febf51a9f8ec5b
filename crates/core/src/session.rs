//! Session state machine - one timed round of play.
//!
//! `GameSession` owns the board, the score, the countdown, and the cascade
//! resolver, and is the single entry point for gameplay mutations. Drivers
//! feed it three kinds of input:
//!
//! - [`GameSession::apply_action`] for keyboard play,
//! - [`GameSession::apply_swap`] for pointer-derived swap requests,
//! - [`GameSession::tick`] / [`GameSession::second_tick`] for time.
//!
//! Exactly one interaction is live at a time: while a cascade is resolving,
//! swap input is ignored until the board is stable again. The countdown keeps
//! running during cascades; when it reaches zero the session freezes, even
//! mid-resolution.

use tui_match3_types::{
    Direction, GameAction, GameEvent, Grade, SwapRequest, BOARD_WIDTH, SESSION_SECONDS, STAGE_MS,
};

use crate::board::Board;
use crate::cascade::CascadeResolver;
use crate::generator::generate;
use crate::moves::is_adjacent_swap;
use crate::rng::{TokenRng, TokenSource};

/// Complete state for one play session.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    source: TokenRng,
    resolver: CascadeResolver,
    events: Vec<GameEvent>,
    score: u32,
    time_left: u32,
    started: bool,
    ended: bool,
    cursor: usize,
    grabbed: bool,
    grade: Option<Grade>,
    stage_ms: u32,
}

impl GameSession {
    /// Create a new, not-yet-started session.
    ///
    /// The board is filled with a raw random preview; the validated playing
    /// board is generated by [`GameSession::start`].
    pub fn new(seed: u32) -> Self {
        let mut source = TokenRng::new(seed);
        let board = Board::random(&mut source);
        Self {
            board,
            source,
            resolver: CascadeResolver::new(),
            events: Vec::new(),
            score: 0,
            time_left: SESSION_SECONDS,
            started: false,
            ended: false,
            cursor: 0,
            grabbed: false,
            grade: None,
            stage_ms: 0,
        }
    }

    /// Start the countdown on a freshly generated solvable board.
    ///
    /// Idempotent while a session is running. If no solvable board can be
    /// generated within the attempt cap, the session starts and immediately
    /// ends with the current score.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        // Reseed from the live RNG so the preview draw does not fix the
        // playing board.
        let mut source = TokenRng::new(self.source.seed());
        self.start_with(&mut source);
        self.source = source;
    }

    /// Start on a board generated from `source` instead of the internal RNG.
    ///
    /// Later refills still draw from the session's own source; this seam
    /// pins the starting board only. Idempotent like [`GameSession::start`],
    /// and ends the session at once if `source` cannot produce a valid board
    /// within the attempt cap.
    pub fn start_with(&mut self, source: &mut impl TokenSource) {
        if self.started {
            return;
        }
        self.started = true;
        match generate(source) {
            Some(board) => self.board = board,
            None => self.finish(),
        }
    }

    /// End the running session now, freezing the board at its final score.
    ///
    /// No-op before `start` and after the session has already ended. The
    /// countdown normally gets here on its own; this is the entry point for
    /// an external driver that cuts a session short.
    pub fn end_session(&mut self) {
        if !self.started || self.ended {
            return;
        }
        self.finish();
    }

    /// Discard everything and begin a fresh, started session.
    pub fn restart(&mut self) {
        let seed = self.source.seed();
        *self = Self::new(seed);
        self.start();
    }

    /// Apply one keyboard action.
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::Start => self.start(),
            GameAction::Restart => self.restart(),
            GameAction::MoveCursor(dir) => {
                if self.grabbed {
                    // A held cell turns the move into a swap attempt.
                    self.grabbed = false;
                    self.swap_toward(dir);
                } else {
                    self.move_cursor(dir);
                }
            }
            GameAction::Grab => {
                if self.accepting_input() {
                    self.grabbed = !self.grabbed;
                }
            }
            GameAction::SwapToward(dir) => {
                self.grabbed = false;
                self.swap_toward(dir);
            }
        }
    }

    /// Attempt the requested swap. Returns whether it was committed.
    ///
    /// Only orthogonally adjacent pairs are accepted; anything else leaves
    /// the board untouched. An accepted swap commits whether or not it
    /// creates a match, then kicks off a resolution pass: the first stage
    /// runs immediately, later stages follow the stage timer. A matchless
    /// swap's resolution finds nothing and finishes without points.
    pub fn apply_swap(&mut self, request: SwapRequest) -> bool {
        if !self.accepting_input() {
            return false;
        }
        if !is_adjacent_swap(request.source, request.target, BOARD_WIDTH) {
            return false;
        }

        self.board.swap(request.source, request.target);
        self.resolver.begin();
        self.stage_ms = 0;
        self.step_resolver();
        true
    }

    /// Advance the stage timer by `elapsed_ms` of wall time.
    ///
    /// Runs at most one cascade stage per full [`STAGE_MS`] elapsed, so each
    /// blast and settle stays on screen for its beat.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.resolver.is_resolving() || self.ended {
            return;
        }
        self.stage_ms += elapsed_ms;
        while self.stage_ms >= STAGE_MS && self.resolver.is_resolving() {
            self.stage_ms -= STAGE_MS;
            self.step_resolver();
        }
    }

    /// Advance the countdown by one second.
    pub fn second_tick(&mut self) {
        if !self.started || self.ended {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.finish();
        }
    }

    /// Drain the events emitted since the last call, in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds remaining on the countdown.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Whether a cascade is currently resolving (swap input is ignored).
    pub fn is_resolving(&self) -> bool {
        self.resolver.is_resolving()
    }

    /// Keyboard cursor, as a flat cell index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn grabbed(&self) -> bool {
        self.grabbed
    }

    /// Final grade, present once the session has ended.
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    fn accepting_input(&self) -> bool {
        self.started && !self.ended && !self.resolver.is_resolving()
    }

    fn move_cursor(&mut self, dir: Direction) {
        if !self.started || self.ended {
            return;
        }
        if let Some(target) = offset_index(self.cursor, dir) {
            self.cursor = target;
        }
    }

    fn swap_toward(&mut self, dir: Direction) {
        if let Some(target) = offset_index(self.cursor, dir) {
            if self.apply_swap(SwapRequest::new(self.cursor, target)) {
                self.cursor = target;
            }
        }
    }

    fn step_resolver(&mut self) {
        let result = self
            .resolver
            .step(&mut self.board, &mut self.source, &mut self.events);
        if result.points > 0 {
            self.score += result.points;
            self.events.push(GameEvent::ScoreChanged { total: self.score });
        }
    }

    /// Freeze the session and publish the final result.
    fn finish(&mut self) {
        self.ended = true;
        self.grabbed = false;
        self.resolver.cancel();
        let grade = Grade::for_score(self.score);
        self.grade = Some(grade);
        self.events.push(GameEvent::SessionEnded {
            score: self.score,
            grade,
        });
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

/// The cell one step in `dir` from `index`, or `None` at a grid edge.
fn offset_index(index: usize, dir: Direction) -> Option<usize> {
    let (dc, dr) = dir.delta();
    let col = (index % BOARD_WIDTH) as i32 + dc;
    let row = (index / BOARD_WIDTH) as i32 + dr;
    if col < 0 || row < 0 {
        return None;
    }
    Board::index(col as usize, row as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::has_possible_move;
    use crate::matcher::{find_matches, has_match_at};
    use crate::moves::neighbors;
    use crate::rng::ScriptedTokens;
    use tui_match3_types::{Token, CELL_COUNT};

    const W: usize = BOARD_WIDTH;

    /// Find a swap the running session would accept, by trial on a copy.
    fn find_legal_swap(session: &GameSession) -> SwapRequest {
        let mut board = session.board().clone();
        for i in 0..CELL_COUNT {
            for j in neighbors(i, W) {
                board.swap(i, j);
                let hit = has_match_at(&board, i) || has_match_at(&board, j);
                board.swap(i, j);
                if hit {
                    return SwapRequest::new(i, j);
                }
            }
        }
        panic!("started session should always have a legal move");
    }

    fn started_session(seed: u32) -> GameSession {
        let mut session = GameSession::new(seed);
        session.start();
        assert!(session.started());
        assert!(!session.ended());
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(1);
        assert!(!session.started());
        assert!(!session.ended());
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), SESSION_SECONDS);
        assert!(!session.board().has_blanks());
    }

    #[test]
    fn test_start_produces_solvable_board() {
        let session = started_session(2024);
        let mut board = session.board().clone();
        assert!(find_matches(&board).is_empty());
        assert!(has_possible_move(&mut board));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut session = started_session(5);
        let board = session.board().clone();
        session.second_tick();
        session.start();
        assert_eq!(*session.board(), board);
        assert_eq!(session.time_left(), SESSION_SECONDS - 1);
    }

    #[test]
    fn test_generation_exhaustion_ends_session() {
        // A single-token source can never produce a match-free board, so the
        // generator gives up at its attempt cap and the session ends at once.
        let mut session = GameSession::new(1);
        let mut source = ScriptedTokens::cycling(&[Token::Red]);
        session.start_with(&mut source);

        assert!(session.started());
        assert!(session.ended());
        assert_eq!(session.score(), 0);
        assert_eq!(session.grade(), Some(Grade::Poor));
        let events = session.take_events();
        assert!(matches!(
            events.last(),
            Some(GameEvent::SessionEnded { score: 0, .. })
        ));

        // The dead session accepts nothing.
        assert!(!session.apply_swap(SwapRequest::new(0, 1)));
        session.second_tick();
        assert_eq!(session.time_left(), SESSION_SECONDS);
    }

    #[test]
    fn test_swap_ignored_before_start() {
        let mut session = GameSession::new(9);
        let before = session.board().clone();
        assert!(!session.apply_swap(SwapRequest::new(0, 1)));
        assert_eq!(*session.board(), before);
    }

    #[test]
    fn test_non_adjacent_swap_rejected() {
        let mut session = started_session(11);
        let before = session.board().clone();
        assert!(!session.apply_swap(SwapRequest::new(0, 63)));
        assert!(!session.apply_swap(SwapRequest::new(7, 8)));
        assert_eq!(*session.board(), before);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_matchless_adjacent_swap_commits() {
        let mut session = started_session(13);
        let before = session.board().clone();
        // The starting board has no match; find an adjacent pair whose
        // exchange creates none either.
        let mut request = None;
        'outer: for i in 0..CELL_COUNT {
            for j in neighbors(i, W) {
                let mut trial = before.clone();
                trial.swap(i, j);
                if find_matches(&trial).is_empty() {
                    request = Some(SwapRequest::new(i, j));
                    break 'outer;
                }
            }
        }
        let request = request.expect("some swap must create no match");

        // The swap sticks even though it scores nothing.
        assert!(session.apply_swap(request));
        let mut expected = before.clone();
        expected.swap(request.source, request.target);
        session.tick(STAGE_MS);
        assert!(!session.is_resolving());
        assert_eq!(*session.board(), expected);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_accepted_swap_scores_and_resolves() {
        let mut session = started_session(77);
        let request = find_legal_swap(&session);
        assert!(session.apply_swap(request));
        // First blast happens immediately.
        assert!(session.score() >= 30);
        assert!(session.is_resolving());

        // Drive the stage timer until the cascade settles.
        let mut guard = 0;
        while session.is_resolving() {
            session.tick(STAGE_MS);
            guard += 1;
            assert!(guard < 1000, "cascade failed to settle");
        }
        assert!(!session.board().has_blanks());
        assert!(find_matches(session.board()).is_empty() || session.score() > 30);

        let events = session.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CellMatched { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CellRefilled { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ScoreChanged { .. })));
    }

    #[test]
    fn test_swap_ignored_while_resolving() {
        let mut session = started_session(77);
        let request = find_legal_swap(&session);
        assert!(session.apply_swap(request));
        assert!(session.is_resolving());
        let before = session.board().clone();
        assert!(!session.apply_swap(SwapRequest::new(0, 1)));
        assert_eq!(*session.board(), before);
    }

    #[test]
    fn test_stage_timer_paces_rounds() {
        let mut session = started_session(77);
        let request = find_legal_swap(&session);
        assert!(session.apply_swap(request));
        let blanks_before = session.board().has_blanks();
        assert!(blanks_before);
        // Less than a full stage: nothing settles yet.
        session.tick(STAGE_MS - 1);
        assert!(session.board().has_blanks());
        // The remaining millisecond completes the stage.
        session.tick(1);
        assert!(!session.board().has_blanks());
    }

    #[test]
    fn test_countdown_ends_session() {
        let mut session = started_session(3);
        for _ in 0..SESSION_SECONDS {
            assert!(!session.ended());
            session.second_tick();
        }
        assert!(session.ended());
        assert_eq!(session.time_left(), 0);
        assert_eq!(session.grade(), Some(Grade::Poor));
        let events = session.take_events();
        assert!(events.contains(&GameEvent::SessionEnded {
            score: 0,
            grade: Grade::Poor,
        }));

        // Frozen: no further input or time has any effect.
        session.second_tick();
        assert_eq!(session.time_left(), 0);
        assert!(!session.apply_swap(find_legal_swap(&session)));
    }

    #[test]
    fn test_end_session_freezes_early() {
        let mut session = GameSession::new(9);
        // Before start there is nothing to end.
        session.end_session();
        assert!(!session.ended());

        session.start();
        session.second_tick();
        session.end_session();
        assert!(session.ended());
        assert_eq!(session.time_left(), SESSION_SECONDS - 1);
        assert_eq!(session.grade(), Some(Grade::for_score(session.score())));
        assert!(matches!(
            session.take_events().last(),
            Some(GameEvent::SessionEnded { .. })
        ));

        // A second call changes nothing.
        session.end_session();
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_session_end_cancels_cascade() {
        let mut session = started_session(77);
        let request = find_legal_swap(&session);
        assert!(session.apply_swap(request));
        assert!(session.is_resolving());
        for _ in 0..SESSION_SECONDS {
            session.second_tick();
        }
        assert!(session.ended());
        assert!(!session.is_resolving());
        // Ticks after the end change nothing.
        let frozen = session.board().clone();
        session.tick(10 * STAGE_MS);
        assert_eq!(*session.board(), frozen);
    }

    #[test]
    fn test_grade_reflects_score() {
        let mut session = started_session(3);
        session.score = 450;
        for _ in 0..SESSION_SECONDS {
            session.second_tick();
        }
        assert_eq!(session.grade(), Some(Grade::Good));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = started_session(8);
        session.score = 120;
        session.second_tick();
        let old_board = session.board().clone();
        session.restart();
        assert!(session.started());
        assert!(!session.ended());
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), SESSION_SECONDS);
        assert_eq!(session.grade(), None);
        // Derived seed: a different board, still solvable.
        assert_ne!(*session.board(), old_board);
        let mut board = session.board().clone();
        assert!(find_matches(&board).is_empty());
        assert!(has_possible_move(&mut board));
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut session = started_session(4);
        assert_eq!(session.cursor(), 0);
        session.apply_action(GameAction::MoveCursor(Direction::Left));
        session.apply_action(GameAction::MoveCursor(Direction::Up));
        assert_eq!(session.cursor(), 0);
        session.apply_action(GameAction::MoveCursor(Direction::Right));
        session.apply_action(GameAction::MoveCursor(Direction::Down));
        assert_eq!(session.cursor(), W + 1);
    }

    #[test]
    fn test_grab_turns_move_into_swap_attempt() {
        let mut session = started_session(21);
        let request = find_legal_swap(&session);
        // Walk the cursor onto the source cell.
        session.cursor = request.source;
        let dir = direction_between(request.source, request.target);
        session.apply_action(GameAction::Grab);
        assert!(session.grabbed());
        session.apply_action(GameAction::MoveCursor(dir));
        assert!(!session.grabbed());
        assert!(session.score() >= 30);
        // An accepted swap carries the cursor with the moved token.
        assert_eq!(session.cursor(), request.target);
    }

    #[test]
    fn test_swap_toward_a_wall_is_a_no_op() {
        let mut session = started_session(6);
        let before = session.board().clone();
        session.apply_action(GameAction::SwapToward(Direction::Left));
        assert_eq!(*session.board(), before);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_board_mutation_hook_scores_a_prepared_run() {
        // Prepared vertical pair in column 0 plus a swap that completes it.
        let mut session = started_session(30);
        let board = session.board_mut();
        *board = Board::empty();
        let pattern = [Token::Red, Token::Blue, Token::Green];
        for r in 0..W {
            for c in 0..W {
                board.set(r * W + c, Some(pattern[(r + c) % 3]));
            }
        }
        board.set(W, Some(Token::Purple));
        board.set(2 * W, Some(Token::Purple));
        board.set(3 * W + 1, Some(Token::Purple));
        assert!(find_matches(board).is_empty());

        assert!(session.apply_swap(SwapRequest::new(3 * W + 1, 3 * W)));
        assert_eq!(session.score(), 30);
    }

    fn direction_between(source: usize, target: usize) -> Direction {
        let (sc, sr) = ((source % W) as i32, (source / W) as i32);
        let (tc, tr) = ((target % W) as i32, (target / W) as i32);
        match (tc - sc, tr - sr) {
            (1, 0) => Direction::Right,
            (-1, 0) => Direction::Left,
            (0, 1) => Direction::Down,
            (0, -1) => Direction::Up,
            _ => panic!("cells are not adjacent"),
        }
    }
}
