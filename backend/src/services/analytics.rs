//! Analytics service: derived, read-only reporting over loads, jumps,
//! instructors and weather. Nothing here mutates state; every figure reflects
//! the rows persisted at the time of the read.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::jump::{jumps_from_rows, Jump, JumpRow};
use crate::models::{
    accumulate_daily_suitability, count_suitable_days, DailySuitability, JumpType, LoadSummary,
    RevenueRates, SuitabilityReading, WeatherCondition,
};
use shared::validation::capacity_utilization;

/// Analytics service. Revenue rates come from configuration.
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
    rates: RevenueRates,
}

/// Statistics for a single load
#[derive(Debug, Serialize)]
pub struct LoadStatistics {
    pub load_id: Uuid,
    pub capacity: i32,
    #[serde(flatten)]
    pub summary: LoadSummary,
}

/// One instructor's assigned jumps with per-type counts
#[derive(Debug, Serialize)]
pub struct InstructorWorkload {
    pub instructor_id: Uuid,
    pub instructor_name: String,
    pub total_jumps: i64,
    pub tandem_jumps: i64,
    pub aff_jumps: i64,
    pub jumps: Vec<Jump>,
}

/// Per-load entry in the daily capacity report; flat so it exports to CSV
#[derive(Debug, Serialize)]
pub struct DailyCapacityEntry {
    pub load_id: Uuid,
    pub aircraft_registration: String,
    pub scheduled_time: DateTime<Utc>,
    pub capacity: i32,
    pub jumpers: i64,
    pub utilization_percentage: Decimal,
}

/// Capacity report for one calendar date
#[derive(Debug, Serialize)]
pub struct DailyCapacityReport {
    pub date: NaiveDate,
    pub total_capacity: i64,
    pub total_jumpers: i64,
    pub overall_utilization: Decimal,
    pub loads: Vec<DailyCapacityEntry>,
}

/// Share of jumps held by one jump type
#[derive(Debug, Serialize)]
pub struct JumpTypeShare {
    pub jump_type: JumpType,
    pub count: i64,
    pub percentage: Decimal,
}

/// Jump type distribution over an optional date window
#[derive(Debug, Serialize)]
pub struct JumpTypeDistribution {
    pub total_jumps: i64,
    pub distribution: Vec<JumpTypeShare>,
}

/// Suitability rollup for one calendar date
#[derive(Debug, Serialize)]
pub struct DailyWeatherImpact {
    pub date: NaiveDate,
    pub tandem_suitable: bool,
    pub student_suitable: bool,
    pub fun_jumper_suitable: bool,
    pub fully_suitable: bool,
    pub conditions: Vec<crate::models::WeatherObservation>,
}

/// Weather impact report over a trailing window of days
#[derive(Debug, Serialize)]
pub struct WeatherImpactReport {
    pub period_days: i64,
    pub suitable_days: i64,
    pub tandem_suitable_days: i64,
    pub student_suitable_days: i64,
    pub daily: Vec<DailyWeatherImpact>,
}

/// True when `time` falls on a calendar date within `[today - days, today]`.
/// Future-dated reports are operator input too and must stay out of a
/// trailing report.
fn within_trailing_window(time: DateTime<Utc>, today: NaiveDate, days: i64) -> bool {
    let date = time.date_naive();
    date <= today && date >= today - chrono::Duration::days(days)
}

/// Percentage of `count` against `total`, rounded to 1 dp; 0 for an empty total
fn percentage_of(count: i64, total: i64) -> Decimal {
    if total <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) / Decimal::from(total) * Decimal::from(100)).round_dp(1)
}

impl AnalyticsService {
    pub fn new(db: PgPool, rates: RevenueRates) -> Self {
        Self { db, rates }
    }

    /// Per-load statistics: jumper counts by type, utilization and the revenue
    /// estimate at the configured rates
    pub async fn get_load_statistics(&self, load_id: Uuid) -> AppResult<LoadStatistics> {
        let capacity: i32 = sqlx::query_scalar(
            r#"
            SELECT a.capacity
            FROM loads l
            JOIN aircraft a ON a.id = l.aircraft_id
            WHERE l.id = $1
            "#,
        )
        .bind(load_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Load".to_string()))?;

        let type_strings: Vec<String> =
            sqlx::query_scalar("SELECT jump_type FROM jumps WHERE load_id = $1")
                .bind(load_id)
                .fetch_all(&self.db)
                .await?;

        let jump_types = type_strings
            .iter()
            .map(|s| s.parse::<JumpType>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(LoadStatistics {
            load_id,
            capacity,
            summary: LoadSummary::compute(capacity, &jump_types, &self.rates),
        })
    }

    /// Workload for one instructor or, when `instructor_id` is None, every
    /// instructor on the roster. `since` bounds by the load's scheduled time.
    pub async fn get_instructor_workload(
        &self,
        instructor_id: Option<Uuid>,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<InstructorWorkload>> {
        let instructors: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT id, name FROM instructors
            WHERE ($1::uuid IS NULL OR id = $1)
            ORDER BY name
            "#,
        )
        .bind(instructor_id)
        .fetch_all(&self.db)
        .await?;

        if instructor_id.is_some() && instructors.is_empty() {
            return Err(AppError::NotFound("Instructor".to_string()));
        }

        let mut workloads = Vec::with_capacity(instructors.len());
        for (id, name) in instructors {
            let rows = sqlx::query_as::<_, JumpRow>(
                r#"
                SELECT j.id, j.load_id, j.jumper_name, j.jump_type, j.exit_order,
                       j.instructor_id, j.aff_level, j.customer_email, j.notes, j.created_at
                FROM jumps j
                JOIN loads l ON l.id = j.load_id
                WHERE j.instructor_id = $1
                  AND ($2::timestamptz IS NULL OR l.scheduled_time >= $2)
                ORDER BY j.exit_order
                "#,
            )
            .bind(id)
            .bind(since)
            .fetch_all(&self.db)
            .await?;

            let jumps = jumps_from_rows(rows)?;
            let tandem_jumps = jumps
                .iter()
                .filter(|j| j.jump_type == JumpType::Tandem)
                .count() as i64;
            let aff_jumps = jumps
                .iter()
                .filter(|j| j.jump_type == JumpType::Aff)
                .count() as i64;

            workloads.push(InstructorWorkload {
                instructor_id: id,
                instructor_name: name,
                total_jumps: jumps.len() as i64,
                tandem_jumps,
                aff_jumps,
                jumps,
            });
        }

        Ok(workloads)
    }

    /// Capacity report for every load scheduled on `date`
    pub async fn get_daily_capacity(&self, date: NaiveDate) -> AppResult<DailyCapacityReport> {
        let rows: Vec<(Uuid, String, DateTime<Utc>, i32, i64)> = sqlx::query_as(
            r#"
            SELECT l.id, a.registration, l.scheduled_time, a.capacity, COUNT(j.id)
            FROM loads l
            JOIN aircraft a ON a.id = l.aircraft_id
            LEFT JOIN jumps j ON j.load_id = l.id
            WHERE l.scheduled_time::date = $1
            GROUP BY l.id, a.registration, l.scheduled_time, a.capacity
            ORDER BY l.scheduled_time
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        let mut total_capacity: i64 = 0;
        let mut total_jumpers: i64 = 0;
        let loads = rows
            .into_iter()
            .map(|(load_id, registration, scheduled_time, capacity, jumpers)| {
                total_capacity += capacity as i64;
                total_jumpers += jumpers;
                DailyCapacityEntry {
                    load_id,
                    aircraft_registration: registration,
                    scheduled_time,
                    capacity,
                    jumpers,
                    utilization_percentage: capacity_utilization(capacity, jumpers),
                }
            })
            .collect();

        let overall_utilization = if total_capacity > 0 {
            (Decimal::from(total_jumpers) / Decimal::from(total_capacity) * Decimal::from(100))
                .round_dp(1)
        } else {
            Decimal::ZERO
        };

        Ok(DailyCapacityReport {
            date,
            total_capacity,
            total_jumpers,
            overall_utilization,
            loads,
        })
    }

    /// Distribution of jump types over an optional scheduled-time window.
    /// Every type appears in the output, zero-count types included.
    pub async fn get_jump_type_distribution(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<JumpTypeDistribution> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT j.jump_type, COUNT(*)
            FROM jumps j
            JOIN loads l ON l.id = j.load_id
            WHERE ($1::timestamptz IS NULL OR l.scheduled_time >= $1)
              AND ($2::timestamptz IS NULL OR l.scheduled_time <= $2)
            GROUP BY j.jump_type
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let mut counts = [0i64; JumpType::ALL.len()];
        let mut total_jumps: i64 = 0;
        for (type_string, count) in rows {
            let jump_type = type_string
                .parse::<JumpType>()
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let idx = JumpType::ALL
                .iter()
                .position(|t| *t == jump_type)
                .unwrap_or(0);
            counts[idx] = count;
            total_jumps += count;
        }

        let distribution = JumpType::ALL
            .iter()
            .zip(counts)
            .map(|(jump_type, count)| JumpTypeShare {
                jump_type: *jump_type,
                count,
                percentage: percentage_of(count, total_jumps),
            })
            .collect();

        Ok(JumpTypeDistribution {
            total_jumps,
            distribution,
        })
    }

    /// Suitability rollup of the weather reports from the last `days` days,
    /// grouped by calendar date. A discipline is suitable for a date when any
    /// report that day marked it suitable.
    pub async fn get_weather_impact(&self, days: i64) -> AppResult<WeatherImpactReport> {
        let rows: Vec<(DateTime<Utc>, String, i32, Decimal, bool, bool, bool)> = sqlx::query_as(
            r#"
            SELECT date, condition, wind_speed, visibility,
                   suitable_for_tandems, suitable_for_students, suitable_for_fun_jumpers
            FROM weather_reports
            WHERE date >= CURRENT_DATE - $1 * INTERVAL '1 day'
              AND date < CURRENT_DATE + INTERVAL '1 day'
            ORDER BY date
            "#,
        )
        .bind(days)
        .fetch_all(&self.db)
        .await?;

        // CURRENT_DATE is the database clock; the UTC calendar window is the
        // authority, so re-check the bounds here.
        let today = Utc::now().date_naive();
        let readings = rows
            .into_iter()
            .filter(|row| within_trailing_window(row.0, today, days))
            .map(
                |(time, condition, wind_speed, visibility, tandems, students, fun)| {
                    Ok(SuitabilityReading {
                        time,
                        condition: condition
                            .parse::<WeatherCondition>()
                            .map_err(|e| AppError::Internal(e.to_string()))?,
                        wind_speed,
                        visibility,
                        suitable_for_tandems: tandems,
                        suitable_for_students: students,
                        suitable_for_fun_jumpers: fun,
                    })
                },
            )
            .collect::<AppResult<Vec<_>>>()?;

        let daily = accumulate_daily_suitability(&readings);
        let counts = count_suitable_days(&daily);

        let daily = daily
            .into_iter()
            .map(|(date, day)| {
                let DailySuitability {
                    tandem_suitable,
                    student_suitable,
                    fun_jumper_suitable,
                    conditions,
                } = day;
                DailyWeatherImpact {
                    date,
                    tandem_suitable,
                    student_suitable,
                    fun_jumper_suitable,
                    fully_suitable: tandem_suitable && student_suitable && fun_jumper_suitable,
                    conditions,
                }
            })
            .collect();

        Ok(WeatherImpactReport {
            period_days: days,
            suitable_days: counts.suitable_days,
            tandem_suitable_days: counts.tandem_suitable_days,
            student_suitable_days: counts.student_suitable_days,
            daily,
        })
    }

    /// Export report rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage_of(1, 3), dec("33.3"));
        assert_eq!(percentage_of(2, 3), dec("66.7"));
        assert_eq!(percentage_of(3, 3), dec("100.0"));
    }

    #[test]
    fn test_percentage_of_zero_total() {
        assert_eq!(percentage_of(0, 0), Decimal::ZERO);
        assert_eq!(percentage_of(5, 0), Decimal::ZERO);
    }

    #[test]
    fn test_window_excludes_future_reports() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2026, 8, 24, 9, 0, 0).unwrap();
        assert!(!within_trailing_window(tomorrow, today, 7));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let today_noon = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
        let oldest = Utc.with_ymd_and_hms(2026, 8, 16, 0, 0, 0).unwrap();
        let too_old = Utc.with_ymd_and_hms(2026, 8, 15, 23, 59, 0).unwrap();

        assert!(within_trailing_window(today_noon, today, 7));
        assert!(within_trailing_window(oldest, today, 7));
        assert!(!within_trailing_window(too_old, today, 7));
    }
}
