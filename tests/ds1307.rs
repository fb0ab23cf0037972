//! Transaction-level tests for the DS1307 driver.
//!
//! Every operation must be exactly one bus transaction (or one write-read
//! pair), addressed to the fixed peripheral address, so the expectations
//! below are exhaustive: any extra or reordered traffic fails the mock.

use claims::{
    assert_err_eq,
    assert_ok,
    assert_ok_eq,
};
use dallas_rtc::{
    Date,
    DateTime,
    Ds1307,
    Error,
    Rtc,
    Time,
};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{
    Mock as I2cMock,
    Transaction as I2cTransaction,
};

const ADDRESS: u8 = 0x68;

const DATETIME: DateTime = DateTime {
    hour: 14,
    minute: 30,
    second: 0,
    year: 2024,
    month: 3,
    day: 15,
    weekday: 5,
};

fn rtc_with(expectations: &[I2cTransaction]) -> Ds1307<I2cMock> {
    Ds1307::new(I2cMock::new(expectations))
}

#[test]
fn init_zeroes_control_register() {
    let mut rtc = rtc_with(&[I2cTransaction::write(ADDRESS, vec![0x07, 0x00])]);

    assert_ok!(rtc.init());

    rtc.release().done();
}

#[test]
fn init_reports_missing_chip() {
    let mut rtc = rtc_with(&[
        I2cTransaction::write(ADDRESS, vec![0x07, 0x00]).with_error(ErrorKind::Other)
    ]);

    assert_err_eq!(rtc.init(), Error::Bus);

    rtc.release().done();
}

#[test]
fn datetime_reads_seven_registers() {
    let mut rtc = rtc_with(&[I2cTransaction::write_read(
        ADDRESS,
        vec![0x00],
        vec![0x00, 0x30, 0x14, 0x05, 0x15, 0x03, 0x24],
    )]);

    assert_ok_eq!(rtc.datetime(), DATETIME);

    rtc.release().done();
}

#[test]
fn datetime_masks_halt_and_mode_bits() {
    // Clock halt in the seconds register, 12-hour flag in the hours
    // register; both masked under the 24-hour interpretation.
    let mut rtc = rtc_with(&[I2cTransaction::write_read(
        ADDRESS,
        vec![0x00],
        vec![0x80 | 0x42, 0x30, 0x40 | 0x09, 0x05, 0x15, 0x03, 0x24],
    )]);

    assert_ok_eq!(
        rtc.datetime(),
        DateTime {
            hour: 9,
            minute: 30,
            second: 42,
            year: 2024,
            month: 3,
            day: 15,
            weekday: 5,
        }
    );

    rtc.release().done();
}

#[test]
fn date_reads_weekday_through_year() {
    let mut rtc = rtc_with(&[I2cTransaction::write_read(
        ADDRESS,
        vec![0x03],
        vec![0x05, 0x15, 0x03, 0x24],
    )]);

    assert_ok_eq!(rtc.date(), DATETIME.date());

    rtc.release().done();
}

#[test]
fn time_reads_seconds_through_hours() {
    let mut rtc = rtc_with(&[I2cTransaction::write_read(
        ADDRESS,
        vec![0x00],
        vec![0x00, 0x30, 0x14],
    )]);

    assert_ok_eq!(rtc.time(), DATETIME.time());

    rtc.release().done();
}

#[test]
fn hour_read_uses_24_hour_interpretation() {
    let mut rtc = rtc_with(&[I2cTransaction::write_read(
        ADDRESS,
        vec![0x02],
        vec![0x40 | 0x12],
    )]);

    assert_ok_eq!(rtc.hour(), 12);

    rtc.release().done();
}

#[test]
fn single_getters_decode_registers() {
    let mut rtc = rtc_with(&[
        I2cTransaction::write_read(ADDRESS, vec![0x00], vec![0x59]),
        I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x30]),
        I2cTransaction::write_read(ADDRESS, vec![0x02], vec![0x14]),
        I2cTransaction::write_read(ADDRESS, vec![0x03], vec![0x05]),
        I2cTransaction::write_read(ADDRESS, vec![0x04], vec![0x15]),
        I2cTransaction::write_read(ADDRESS, vec![0x05], vec![0x03]),
        I2cTransaction::write_read(ADDRESS, vec![0x06], vec![0x24]),
    ]);

    assert_ok_eq!(rtc.second(), 59);
    assert_ok_eq!(rtc.minute(), 30);
    assert_ok_eq!(rtc.hour(), 14);
    assert_ok_eq!(rtc.weekday(), 5);
    assert_ok_eq!(rtc.day(), 15);
    assert_ok_eq!(rtc.month(), 3);
    assert_ok_eq!(rtc.year(), 2024);

    rtc.release().done();
}

#[test]
fn set_datetime_writes_full_register_range() {
    let mut rtc = rtc_with(&[I2cTransaction::write(
        ADDRESS,
        vec![0x00, 0x00, 0x30, 0x14, 0x05, 0x15, 0x03, 0x24],
    )]);

    assert_ok!(rtc.set_datetime(&DATETIME));

    rtc.release().done();
}

#[test]
fn set_date_writes_weekday_through_year() {
    let mut rtc = rtc_with(&[I2cTransaction::write(
        ADDRESS,
        vec![0x03, 0x03, 0x01, 0x01, 0x25],
    )]);

    assert_ok!(rtc.set_date(&Date {
        year: 2025,
        month: 1,
        day: 1,
        weekday: 3,
    }));

    rtc.release().done();
}

#[test]
fn set_time_writes_seconds_through_hours() {
    let mut rtc = rtc_with(&[I2cTransaction::write(
        ADDRESS,
        vec![0x00, 0x42, 0x15, 0x08],
    )]);

    assert_ok!(rtc.set_time(&Time {
        hour: 8,
        minute: 15,
        second: 42,
    }));

    rtc.release().done();
}

#[test]
fn single_setters_write_packed_bcd() {
    let mut rtc = rtc_with(&[
        I2cTransaction::write(ADDRESS, vec![0x02, 0x14]),
        I2cTransaction::write(ADDRESS, vec![0x06, 0x24]),
        I2cTransaction::write(ADDRESS, vec![0x03, 0x05]),
    ]);

    assert_ok!(rtc.set_hour(14));
    assert_ok!(rtc.set_year(2024));
    // The weekday is raw, not BCD.
    assert_ok!(rtc.set_weekday(5));

    rtc.release().done();
}
