use chrono::NaiveDate;
use homestay::config::BookingPolicy;
use homestay::db::Database;
use homestay::models::*;
use homestay_core::BlackoutSet;
use speculate2::speculate;
use uuid::Uuid;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
}

fn nov(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

fn stay(start: NaiveDate, end: NaiveDate) -> NewReservation {
    CreateReservationInput {
        email: "john.doe@example.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        national_id: "ABC123456".to_string(),
        start_date: Some(start),
        end_date: Some(end),
        num_guests: 2,
    }
    .validate()
    .expect("Invalid test reservation")
}

fn is_unavailable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DatesUnavailable>().is_some()
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
        let policy = BookingPolicy::default();
    }

    describe "reservations" {
        describe "create_reservation" {
            it "stores the stay with its total cost" {
                let reservation = db.create_reservation(stay(day(10), day(13)), &policy)
                    .expect("Failed to create reservation");

                assert_eq!(reservation.first_name, "John");
                assert_eq!(reservation.start_date, day(10));
                assert_eq!(reservation.end_date, day(13));
                assert_eq!(reservation.num_guests.get(), 2);
                assert_eq!(reservation.total_cost, 1_500_000);
            }

            it "prices with the configured nightly rate" {
                let policy = BookingPolicy { nightly_rate: 100, ..BookingPolicy::default() };
                let reservation = db.create_reservation(stay(day(1), day(8)), &policy)
                    .expect("Failed to create reservation");

                assert_eq!(reservation.total_cost, 700);
            }

            it "refuses a stay that overlaps an existing one" {
                db.create_reservation(stay(day(10), day(13)), &policy).expect("Failed to create");

                let err = db.create_reservation(stay(day(12), day(15)), &policy).unwrap_err();
                assert!(is_unavailable(&err));

                let err = db.create_reservation(stay(day(8), day(20)), &policy).unwrap_err();
                assert!(is_unavailable(&err));

                assert_eq!(db.get_all_reservations().expect("Query failed").len(), 1);
            }

            it "allows a check-in on another stay's check-out day" {
                db.create_reservation(stay(day(10), day(13)), &policy).expect("Failed to create");
                db.create_reservation(stay(day(13), day(15)), &policy).expect("Back-to-back stay refused");
                db.create_reservation(stay(day(7), day(10)), &policy).expect("Back-to-back stay refused");

                assert_eq!(db.get_all_reservations().expect("Query failed").len(), 3);
            }

            it "refuses a stay touching a blackout date" {
                let err = db.create_reservation(stay(nov(26), nov(28)), &policy).unwrap_err();
                assert!(is_unavailable(&err));

                let err = db.create_reservation(stay(nov(25), dec_first()), &policy).unwrap_err();
                assert!(is_unavailable(&err));

                db.create_reservation(stay(nov(20), nov(27)), &policy)
                    .expect("Stay before the blackout refused");
            }

            it "ignores blackout dates when the policy has none" {
                let policy = BookingPolicy { blackout: BlackoutSet::default(), ..BookingPolicy::default() };
                db.create_reservation(stay(nov(28), nov(30)), &policy)
                    .expect("Failed to create reservation");
            }
        }

        describe "get_reservation" {
            it "returns None for a non-existent reservation" {
                let result = db.get_reservation(Uuid::new_v4()).expect("Query failed");
                assert!(result.is_none());
            }

            it "returns the reservation by id" {
                let created = db.create_reservation(stay(day(10), day(13)), &policy).expect("Failed to create");

                let found = db.get_reservation(created.id).expect("Query failed").expect("Not found");
                assert_eq!(found.id, created.id);
                assert_eq!(found.email, "john.doe@example.com");
                assert_eq!(found.national_id, "ABC123456");
                assert_eq!(found.start_date, day(10));
                assert_eq!(found.end_date, day(13));
                assert_eq!(found.num_guests.get(), 2);
                assert_eq!(found.total_cost, 1_500_000);
            }
        }

        describe "get_all_reservations" {
            it "returns an empty list on a fresh database" {
                assert!(db.get_all_reservations().expect("Query failed").is_empty());
            }

            it "orders reservations by check-in date" {
                db.create_reservation(stay(day(20), day(22)), &policy).expect("Failed to create");
                db.create_reservation(stay(day(2), day(4)), &policy).expect("Failed to create");
                db.create_reservation(stay(day(10), day(12)), &policy).expect("Failed to create");

                let starts: Vec<_> = db.get_all_reservations().expect("Query failed")
                    .into_iter()
                    .map(|r| r.start_date)
                    .collect();
                assert_eq!(starts, vec![day(2), day(10), day(20)]);
            }
        }

        describe "delete_reservation" {
            it "removes the reservation and frees its dates" {
                let created = db.create_reservation(stay(day(10), day(13)), &policy).expect("Failed to create");

                assert!(db.delete_reservation(created.id).expect("Delete failed"));
                assert!(db.get_reservation(created.id).expect("Query failed").is_none());

                db.create_reservation(stay(day(10), day(13)), &policy).expect("Dates still blocked");
            }

            it "returns false for a non-existent reservation" {
                assert!(!db.delete_reservation(Uuid::new_v4()).expect("Delete failed"));
            }
        }
    }

    describe "availability" {
        it "lists every day of an empty window outside blackouts" {
            let dates = db.find_available_dates(day(1), day(5), &policy).expect("Query failed");
            assert_eq!(dates, vec![day(1), day(2), day(3), day(4), day(5)]);
        }

        it "excludes blackout dates" {
            let dates = db.find_available_dates(nov(27), dec_first(), &policy).expect("Query failed");
            assert_eq!(dates, vec![nov(27), dec_first()]);
        }

        it "excludes booked nights but not the check-out day" {
            db.create_reservation(stay(day(10), day(13)), &policy).expect("Failed to create");

            let dates = db.find_available_dates(day(9), day(14), &policy).expect("Query failed");
            assert_eq!(dates, vec![day(9), day(13), day(14)]);
        }

        it "sees stays that start before the window" {
            db.create_reservation(stay(day(1), day(6)), &policy).expect("Failed to create");

            let booked = db.get_booked_ranges(day(4), day(8)).expect("Query failed");
            assert_eq!(booked.len(), 1);

            let dates = db.find_available_dates(day(4), day(8), &policy).expect("Query failed");
            assert_eq!(dates, vec![day(6), day(7), day(8)]);
        }

        it "returns a single day window" {
            let dates = db.find_available_dates(day(3), day(3), &policy).expect("Query failed");
            assert_eq!(dates, vec![day(3)]);
        }
    }

    describe "open" {
        it "creates the database file and reopens existing data" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("homestay.db");

            let created = {
                let db = Database::open(path.clone()).expect("Failed to open");
                db.migrate().expect("Failed to migrate");
                db.create_reservation(stay(day(10), day(13)), &policy).expect("Failed to create")
            };

            let reopened = Database::open(path).expect("Failed to reopen");
            reopened.migrate().expect("Failed to migrate");
            let found = reopened.get_reservation(created.id).expect("Query failed");
            assert!(found.is_some());
        }
    }
}

fn dec_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
}
