mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use homestay_core::{validate_range, DateRange, GuestCount};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::config::BookingPolicy;
use crate::models::*;

const RESERVATION_COLUMNS: &str = "id, email, first_name, last_name, national_id, start_date, end_date, num_guests, total_cost, created_at";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Reservation operations
    // ============================================================

    pub fn get_all_reservations(&self) -> Result<Vec<Reservation>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY start_date, created_at"
        ))?;

        let reservations = stmt
            .query_map([], reservation_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reservations)
    }

    pub fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?"
        ))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(reservation_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Store a reservation if its dates are free.
    ///
    /// Fails with [`DatesUnavailable`] when the stay touches a blackout date or
    /// shares a night with an existing reservation. The overlap check and the
    /// insert run in one transaction.
    pub fn create_reservation(
        &self,
        new: NewReservation,
        policy: &BookingPolicy,
    ) -> Result<Reservation> {
        let range = new.date_range;
        if policy.blackout.touches(&range) {
            return Err(DatesUnavailable::from(&range).into());
        }

        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;

        let clashes: i64 = tx.query_row(
            "SELECT COUNT(*) FROM reservations WHERE start_date < ? AND ? < end_date",
            (range.end(), range.start()),
            |row| row.get(0),
        )?;
        if clashes > 0 {
            return Err(DatesUnavailable::from(&range).into());
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let total_cost = range.total_cost(policy.nightly_rate);

        tx.execute(
            &format!(
                "INSERT INTO reservations ({RESERVATION_COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            (
                id.to_string(),
                &new.guest.email,
                &new.guest.first_name,
                &new.guest.last_name,
                &new.guest.national_id,
                range.start(),
                range.end(),
                i64::from(new.num_guests.get()),
                i64::try_from(total_cost).context("Total cost out of range")?,
                now.to_rfc3339(),
            ),
        )
        .context("Failed to insert reservation")?;

        tx.commit().context("Failed to commit reservation")?;

        tracing::info!(
            reservation_id = %id,
            email = %new.guest.email,
            start = %range.start(),
            end = %range.end(),
            "Added reservation"
        );

        Ok(Reservation {
            id,
            email: new.guest.email,
            first_name: new.guest.first_name,
            last_name: new.guest.last_name,
            national_id: new.guest.national_id,
            start_date: range.start(),
            end_date: range.end(),
            num_guests: new.num_guests,
            total_cost,
            created_at: now,
        })
    }

    pub fn delete_reservation(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM reservations WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Availability
    // ============================================================

    /// Stays that have at least one night in `from..=to`.
    pub fn get_booked_ranges(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DateRange>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT start_date, end_date FROM reservations
             WHERE start_date <= ? AND end_date > ?
             ORDER BY start_date",
        )?;

        let ranges = stmt
            .query_map((to, from), |row| {
                Ok(validate_range(Some(row.get(0)?), Some(row.get(1)?)).ok())
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ranges.into_iter().flatten().collect())
    }

    /// Dates in `from..=to` that are neither blacked out nor booked for the night.
    pub fn find_available_dates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        policy: &BookingPolicy,
    ) -> Result<Vec<NaiveDate>> {
        let booked = self.get_booked_ranges(from, to)?;

        let dates = from
            .iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| !policy.blackout.contains(*d))
            .filter(|d| !booked.iter().any(|range| range.includes_night(*d)))
            .collect();

        Ok(dates)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: parse_uuid(row.get::<_, String>(0)?),
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        national_id: row.get(4)?,
        start_date: row.get(5)?,
        end_date: row.get(6)?,
        num_guests: GuestCount::try_from(row.get::<_, i64>(7)?).unwrap_or_default(),
        total_cost: u64::try_from(row.get::<_, i64>(8)?).unwrap_or_default(),
        created_at: parse_datetime(row.get::<_, String>(9)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
