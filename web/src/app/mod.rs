use chrono::prelude::*;
use gloo::timers::callback::{Interval, Timeout};
use serde::{Deserialize, Serialize};
use topito_core as game;
use topito_core::MoleSource;
use yew::prelude::*;

mod summary;
mod utils;

use summary::SummaryView;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

fn format_for_counter(num: u32) -> String {
    match num {
        ..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

/// What the player gets told when the round ends.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct RoundReport {
    pub elapsed_secs: u32,
    pub miss_count: game::MissCount,
}

/// One round plus the wall-clock bookkeeping the core crate stays out of.
///
/// The authoritative completion time comes from `started_at`/`ended_at`; the
/// scoreboard value shown while playing is recomputed from the same clock, so
/// the one-second display tick can never drift into the reported result.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RoundSession {
    round: game::Round,
    gate: game::ClickGate,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl RoundSession {
    fn new(round: game::Round, started_at: DateTime<Utc>) -> Self {
        let gate = game::ClickGate::new(round.hole_count());
        Self {
            round,
            gate,
            started_at,
            ended_at: None,
        }
    }

    fn is_active(&self) -> bool {
        !self.round.is_finished()
    }

    fn hole_count(&self) -> game::HoleCount {
        self.round.hole_count()
    }

    fn mole(&self) -> Option<game::HoleIndex> {
        self.round.mole()
    }

    fn miss_count(&self) -> game::MissCount {
        self.round.miss_count()
    }

    fn place_mole(&mut self, index: game::HoleIndex) -> game::Result<()> {
        self.round.place_mole(index)
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    /// Runs a click through the debounce gate and then the round; a winning
    /// hit freezes the end timestamp.
    fn click(&mut self, index: game::HoleIndex, now: DateTime<Utc>) -> game::ClickOutcome {
        let now_ms = now.timestamp_millis().max(0) as game::Millis;
        if !self.gate.admit(index, now_ms) {
            return game::ClickOutcome::Ignored;
        }

        let outcome = self.round.click(index);
        if outcome == game::ClickOutcome::Hit && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
        outcome
    }

    fn report(&self) -> Option<RoundReport> {
        let ended_at = self.ended_at?;
        Some(RoundReport {
            elapsed_secs: self.elapsed_secs(ended_at),
            miss_count: self.round.miss_count(),
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    SetDifficulty(game::Difficulty),
    StartGame,
    HoleClicked(game::HoleIndex),
    MoveMole,
    UpdateTime,
    DismissReport,
}

#[derive(Properties, Clone, PartialEq)]
struct HoleProps {
    index: game::HoleIndex,
    #[prop_or_default]
    has_mole: bool,
    callback: Callback<game::HoleIndex>,
}

#[function_component(HoleView)]
fn hole_component(props: &HoleProps) -> Html {
    let HoleProps {
        index,
        has_mole,
        callback,
    } = props.clone();

    let class = classes!("hole", has_mole.then_some("mole"));
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("hole {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick}/>
    }
}

/// Browser timers scoped to the active round. Dropping this cancels both
/// underlying callbacks, so every exit path (win, restart, unmount) tears the
/// timers down with it.
#[derive(Debug)]
struct RoundTimers {
    _elapsed: Interval,
    mole: Option<Timeout>,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    difficulty: game::Difficulty,
    session: Option<RoundSession>,
    source: game::RandomMoleSource,
    report: Option<RoundReport>,
    prev_time: u32,
    timers: Option<RoundTimers>,
}

impl GameView {
    fn hole_count(&self) -> game::HoleCount {
        self.session
            .as_ref()
            .map_or_else(|| self.difficulty.hole_count(), RoundSession::hole_count)
    }

    fn get_time(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(0, |session| session.elapsed_secs(utc_now()))
    }

    fn get_miss_count(&self) -> game::MissCount {
        self.session.as_ref().map_or(0, RoundSession::miss_count)
    }

    fn in_round(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(RoundSession::is_active)
    }

    fn schedule_mole(ctx: &Context<Self>, delay: game::Millis) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(delay as u32, move || link.send_message(Msg::MoveMole))
    }

    fn create_elapsed_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1_000, move || link.send_message(Msg::UpdateTime))
    }

    fn start_round(&mut self, ctx: &Context<Self>) {
        let mut round = game::Round::new(self.difficulty);
        let first = self.source.pick_hole(round.hole_count());
        round
            .place_mole(first)
            .expect("fresh round accepts its first mole");

        self.session = Some(RoundSession::new(round, utc_now()));
        self.report = None;
        self.prev_time = 0;
        self.timers = Some(RoundTimers {
            _elapsed: Self::create_elapsed_timer(ctx),
            mole: Some(Self::schedule_mole(ctx, self.source.next_delay())),
        });
        log::debug!("round started with {} holes", self.hole_count());
    }

    fn stop_round_timers(&mut self) {
        // dropping the handles cancels the underlying browser timers
        self.timers = None;
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(utils::js_random_seed);
        log::debug!("mole source seed: {}", seed);
        Self {
            difficulty: Default::default(),
            session: None,
            source: game::RandomMoleSource::new(seed),
            report: None,
            prev_time: 0,
            timers: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SetDifficulty(difficulty) => {
                // takes effect at the next round start, the running grid keeps its size
                if self.difficulty != difficulty {
                    log::debug!("difficulty set to {:?}", difficulty);
                    self.difficulty = difficulty;
                    true
                } else {
                    false
                }
            }
            StartGame => {
                self.start_round(ctx);
                true
            }
            HoleClicked(index) => {
                let now = utc_now();
                let Some(session) = self.session.as_mut() else {
                    log::trace!("click on hole {} while idle", index);
                    return false;
                };

                let outcome = session.click(index, now);
                if outcome == game::ClickOutcome::Hit {
                    self.report = session.report();
                    self.stop_round_timers();
                }
                outcome.has_update()
            }
            MoveMole => {
                let Some(session) = self.session.as_mut() else {
                    return false;
                };
                if !session.is_active() {
                    return false;
                }

                let next = self.source.pick_hole(session.hole_count());
                if let Err(err) = session.place_mole(next) {
                    log::warn!("could not move mole: {}", err);
                    return false;
                }
                if let Some(timers) = self.timers.as_mut() {
                    timers.mole = Some(Self::schedule_mole(ctx, self.source.next_delay()));
                }
                true
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            DismissReport => self.report.take().is_some(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let in_round = self.in_round();
        let hole_count = self.hole_count();
        let mole = self
            .session
            .as_ref()
            .filter(|session| session.is_active())
            .and_then(RoundSession::mole);
        let miss_count = format_for_counter(self.get_miss_count());
        let elapsed_time = format_for_counter(self.get_time());

        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            StartGame
        });
        let cb_hole = ctx.link().callback(HoleClicked);
        let cb_dismiss = ctx.link().callback(|_: MouseEvent| DismissReport);

        html! {
            <div class="topito">
                <h1>{"Catch the Mole"}</h1>
                <fieldset disabled={in_round}>
                    <legend>{"Difficulty"}</legend>
                    {
                        for game::Difficulty::ALL.into_iter().map(|difficulty| {
                            let onchange = ctx.link().batch_callback(move |e: Event| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                input.checked().then_some(SetDifficulty(difficulty))
                            });
                            html! {
                                <label>
                                    <input
                                        type="radio"
                                        name="difficulty"
                                        checked={self.difficulty == difficulty}
                                        {onchange}
                                    />
                                    { difficulty.label() }
                                </label>
                            }
                        })
                    }
                </fieldset>
                <nav>
                    <aside>{"Misses: "}{miss_count}</aside>
                    <aside>{"Time: "}{elapsed_time}</aside>
                </nav>
                <div class={classes!("grid", in_round.then_some("playable"))}>
                    {
                        for (0..hole_count).map(|index| {
                            let has_mole = mole == Some(index);
                            html! {
                                <HoleView {index} {has_mole} callback={cb_hole.clone()}/>
                            }
                        })
                    }
                </div>
                if !in_round {
                    <button class="start" onclick={cb_start}>{"Start Game"}</button>
                }
                <SummaryView report={self.report} on_dismiss={cb_dismiss}/>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(offset_ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(offset_ms).unwrap()
    }

    fn session_with_mole(difficulty: game::Difficulty, mole: game::HoleIndex) -> RoundSession {
        let mut round = game::Round::new(difficulty);
        round.place_mole(mole).unwrap();
        RoundSession::new(round, t(0))
    }

    #[test]
    fn fresh_session_has_zeroed_scoreboard() {
        let session = session_with_mole(game::Difficulty::Easy, 0);

        assert_eq!(session.miss_count(), 0);
        assert_eq!(session.elapsed_secs(t(0)), 0);
        assert_eq!(session.report(), None);
    }

    #[test]
    fn next_round_session_zeroes_the_scoreboard_again() {
        let mut session = session_with_mole(game::Difficulty::Easy, 2);
        assert_eq!(session.click(0, t(1_000)), game::ClickOutcome::Miss);
        session.place_mole(2).unwrap();
        assert_eq!(session.click(2, t(5_400)), game::ClickOutcome::Hit);
        assert_eq!(
            session.report(),
            Some(RoundReport {
                elapsed_secs: 5,
                miss_count: 1,
            })
        );

        // the next start builds a fresh round and session from scratch
        let mut round = game::Round::new(game::Difficulty::Easy);
        round.place_mole(0).unwrap();
        let next = RoundSession::new(round, t(60_000));

        assert_eq!(next.miss_count(), 0);
        assert_eq!(next.elapsed_secs(t(60_000)), 0);
        assert_eq!(next.report(), None);
    }

    #[test]
    fn hit_after_three_seconds_reports_elapsed_and_misses() {
        let mut session = session_with_mole(game::Difficulty::Easy, 1);

        assert_eq!(session.click(1, t(3_000)), game::ClickOutcome::Hit);
        assert!(!session.is_active());
        assert_eq!(
            session.report(),
            Some(RoundReport {
                elapsed_secs: 3,
                miss_count: 0,
            })
        );
    }

    #[test]
    fn wrong_hole_on_hard_grid_counts_a_miss_and_round_continues() {
        let mut session = session_with_mole(game::Difficulty::Hard, 4);

        assert_eq!(session.click(0, t(500)), game::ClickOutcome::Miss);
        assert_eq!(session.miss_count(), 1);
        assert!(session.is_active());
        assert_eq!(session.report(), None);
    }

    #[test]
    fn rapid_second_click_is_debounced_even_after_rearm() {
        let mut session = session_with_mole(game::Difficulty::Easy, 1);

        assert_eq!(session.click(0, t(500)), game::ClickOutcome::Miss);
        // the mole moves onto the hole just clicked, re-arming the round
        session.place_mole(0).unwrap();

        // within the 200ms window of the first click on hole 0
        assert_eq!(session.click(0, t(650)), game::ClickOutcome::Ignored);
        assert_eq!(session.miss_count(), 1);

        // outside the window the same hole scores again
        assert_eq!(session.click(0, t(700)), game::ClickOutcome::Hit);
    }

    #[test]
    fn elapsed_is_frozen_at_the_winning_hit() {
        let mut session = session_with_mole(game::Difficulty::Easy, 2);

        assert_eq!(session.click(2, t(4_200)), game::ClickOutcome::Hit);

        assert_eq!(session.elapsed_secs(t(60_000)), 4);
        assert_eq!(session.report().unwrap().elapsed_secs, 4);
    }

    #[test]
    fn clicks_after_the_win_change_nothing() {
        let mut session = session_with_mole(game::Difficulty::Easy, 0);

        assert_eq!(session.click(0, t(1_000)), game::ClickOutcome::Hit);
        let report = session.report();

        assert_eq!(session.click(1, t(2_000)), game::ClickOutcome::Ignored);
        assert_eq!(session.report(), report);
    }

    #[test]
    fn mole_placement_is_rejected_once_the_session_is_won() {
        let mut session = session_with_mole(game::Difficulty::Easy, 0);

        assert_eq!(session.click(0, t(1_000)), game::ClickOutcome::Hit);
        assert_eq!(session.place_mole(1), Err(game::GameError::RoundOver));
    }

    #[test]
    fn counter_formatting_pads_and_clamps() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(999), "999");
        assert_eq!(format_for_counter(1500), "999");
    }
}
