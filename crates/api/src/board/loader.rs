//! Board loading: fetch the four record sets concurrently and fold them into
//! a [`BoardView`].
//!
//! A failing fetch never fails the whole board. The affected section is
//! rendered empty and listed in [`BoardView::degraded`] so the client can
//! tell "no data" apart from "data unavailable".

use async_trait::async_trait;
use fightpicks_core::board::{
    assemble_board, group_fights, own_picks, tally_picks, AttributedPick, BoardSection,
    BoardView, EventRecord, FightRecord, OwnPickRecord,
};
use fightpicks_core::types::{DbId, Timestamp};
use fightpicks_db::repositories::{EventRepo, FightRepo, PickRepo};
use fightpicks_db::DbPool;

/// Read access to the records the board is built from.
#[async_trait]
pub trait BoardSource: Send + Sync {
    async fn events(&self) -> Result<Vec<EventRecord>, sqlx::Error>;

    async fn fights(&self) -> Result<Vec<FightRecord>, sqlx::Error>;

    async fn own_picks(&self, user_id: DbId) -> Result<Vec<OwnPickRecord>, sqlx::Error>;

    /// Every pick in the system with its owner's username(s).
    async fn attributed_picks(&self) -> Result<Vec<AttributedPick>, sqlx::Error>;
}

/// [`BoardSource`] backed by Postgres.
///
/// Attributed picks are read page by page so no single query is unbounded.
/// All pages share one snapshot, so a pick changed mid-read is seen once.
pub struct PgBoardSource {
    pool: DbPool,
    page_size: i64,
}

impl PgBoardSource {
    pub fn new(pool: DbPool, page_size: i64) -> Self {
        Self {
            pool,
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl BoardSource for PgBoardSource {
    async fn events(&self) -> Result<Vec<EventRecord>, sqlx::Error> {
        let rows = EventRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(EventRecord::from).collect())
    }

    async fn fights(&self) -> Result<Vec<FightRecord>, sqlx::Error> {
        let rows = FightRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(FightRecord::from).collect())
    }

    async fn own_picks(&self, user_id: DbId) -> Result<Vec<OwnPickRecord>, sqlx::Error> {
        let rows = PickRepo::list_for_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(OwnPickRecord::from).collect())
    }

    async fn attributed_picks(&self) -> Result<Vec<AttributedPick>, sqlx::Error> {
        let mut tx = fightpicks_db::begin_read_snapshot(&self.pool).await?;
        let mut picks = Vec::new();
        let mut cursor = None;
        loop {
            let page = PickRepo::list_attributed_page(&mut *tx, cursor, self.page_size).await?;
            let full_page = page.len() as i64 == self.page_size;
            cursor = page.last().map(|row| row.cursor());
            picks.extend(page.into_iter().map(AttributedPick::from));
            if !full_page {
                break;
            }
        }
        tx.commit().await?;
        tracing::debug!(count = picks.len(), "Loaded attributed picks");
        Ok(picks)
    }
}

/// Build the board for `user_id` (or an anonymous visitor) as of `now`.
///
/// Anonymous visitors get no own picks and no tally; the pick queries are
/// not issued for them at all.
pub async fn load_board<S>(source: &S, user_id: Option<DbId>, now: Timestamp) -> BoardView
where
    S: BoardSource + ?Sized,
{
    let own_fut = async {
        match user_id {
            Some(id) => source.own_picks(id).await,
            None => Ok(Vec::new()),
        }
    };
    let tally_fut = async {
        match user_id {
            Some(_) => source.attributed_picks().await,
            None => Ok(Vec::new()),
        }
    };

    let (events, fights, own, attributed) =
        tokio::join!(source.events(), source.fights(), own_fut, tally_fut);

    let mut degraded = Vec::new();
    let events = recover(events, BoardSection::Events, &mut degraded);
    let fights = recover(fights, BoardSection::Fights, &mut degraded);
    let own = recover(own, BoardSection::OwnPicks, &mut degraded);
    let attributed = recover(attributed, BoardSection::Tally, &mut degraded);

    let grouped = group_fights(&events, &fights);
    for anomaly in &grouped.anomalies {
        tracing::warn!(?anomaly, "Board data integrity anomaly");
    }

    let tally = tally_picks(&attributed);
    for anomaly in &tally.anomalies {
        tracing::warn!(?anomaly, "Pick tally anomaly");
    }

    let mut view = assemble_board(&grouped, &own_picks(&own), &tally, now);
    view.degraded = degraded;

    tracing::debug!(
        user_id = ?user_id,
        events = view.events.len(),
        degraded = view.degraded.len(),
        "Board assembled"
    );
    view
}

fn recover<T: Default>(
    result: Result<T, sqlx::Error>,
    section: BoardSection,
    degraded: &mut Vec<BoardSection>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, ?section, "Board section unavailable, rendering empty");
            degraded.push(section);
            T::default()
        }
    }
}
