//! Utilidades de cálculo de tiempo
//!
//! Este módulo contiene las funciones de cálculo de horas para eventos
//! de bitácora y cierres de período. Las horas se calculan como diferencia
//! en milisegundos dividida por 3,600,000.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Combinar fecha y hora en un datetime naive
pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    NaiveDateTime::new(date, time)
}

/// Calcular las horas de operación de un evento al cerrarlo.
///
/// Ambas horas se interpretan sobre la fecha del evento. Si la duración
/// resultante es cero o negativa (hora de fin anterior o igual a la de
/// inicio) se retorna `None` y la duración queda sin registrar.
pub fn event_duration_hours(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<f64> {
    let start_dt = combine(date, start);
    let end_dt = combine(date, end);
    let millis = (end_dt - start_dt).num_milliseconds() as f64;
    let hours = millis / MILLIS_PER_HOUR;

    if hours > 0.0 {
        Some(hours)
    } else {
        None
    }
}

/// Calcular las horas de operación de un período de cierre.
///
/// A diferencia de los eventos, el período puede abarcar varias fechas.
/// Un período invertido se trunca a cero en lugar de producir horas
/// negativas.
pub fn period_operating_hours(
    start_date: NaiveDate,
    start_time: NaiveTime,
    end_date: NaiveDate,
    end_time: NaiveTime,
) -> f64 {
    let start_dt = combine(start_date, start_time);
    let end_dt = combine(end_date, end_time);
    let hours = (end_dt - start_dt).num_milliseconds() as f64 / MILLIS_PER_HOUR;

    hours.max(0.0)
}

/// Horas efectivas: horas de operación menos horas perdidas en novedades,
/// con piso en cero.
pub fn effective_hours(operating_hours: f64, incident_hours: f64) -> f64 {
    (operating_hours - incident_hours).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_duracion_jornada_completa() {
        let hours = event_duration_hours(date(2024, 1, 10), time(8, 0), time(16, 0));
        assert_eq!(hours, Some(8.0));
    }

    #[test]
    fn test_duracion_media_hora() {
        let hours = event_duration_hours(date(2024, 1, 10), time(8, 0), time(8, 30));
        assert_eq!(hours, Some(0.5));
    }

    #[test]
    fn test_duracion_fin_antes_del_inicio_es_none() {
        let hours = event_duration_hours(date(2024, 1, 10), time(16, 0), time(8, 0));
        assert_eq!(hours, None);
    }

    #[test]
    fn test_duracion_cero_es_none() {
        let hours = event_duration_hours(date(2024, 1, 10), time(8, 0), time(8, 0));
        assert_eq!(hours, None);
    }

    #[test]
    fn test_periodo_mismo_dia() {
        let hours =
            period_operating_hours(date(2024, 1, 10), time(6, 0), date(2024, 1, 10), time(18, 0));
        assert_eq!(hours, 12.0);
    }

    #[test]
    fn test_periodo_varios_dias() {
        let hours =
            period_operating_hours(date(2024, 1, 10), time(22, 0), date(2024, 1, 11), time(6, 0));
        assert_eq!(hours, 8.0);
    }

    #[test]
    fn test_periodo_invertido_se_trunca_a_cero() {
        let hours =
            period_operating_hours(date(2024, 1, 11), time(8, 0), date(2024, 1, 10), time(8, 0));
        assert_eq!(hours, 0.0);
    }

    #[test]
    fn test_horas_efectivas() {
        assert_eq!(effective_hours(12.0, 2.5), 9.5);
        assert_eq!(effective_hours(2.0, 5.0), 0.0);
        assert_eq!(effective_hours(8.0, 0.0), 8.0);
    }
}
