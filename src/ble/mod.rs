//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertising** - (re)started on a kick from the control loop, which
//!    rate-limits its requests to one per retry interval while no central
//!    is connected.
//! 2. **GATT server** - one primary service with a single
//!    read/write/notify characteristic carrying the encoder report.
//! 3. **Notify pump** - drains the outbound message channel and pushes each
//!    payload as a GATT notification while a link is up.
//!
//! Communication with the control loop is done via the statics below: the
//! loop reads [`CONNECTED`] once per iteration and never writes it; this
//! task is its only writer. The reverse holds for [`ADV_KICK`] and
//! [`OUTBOX`].

use core::mem;
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use nrf_softdevice::ble::{gatt_server, peripheral, Connection};
use nrf_softdevice::{raw, Softdevice};

use crate::config::{DEVICE_NAME, OUTBOX_CAPACITY};
use crate::notify::OutboundMessage;

/// Live peer-connected flag. Written only by [`ble_task`]; the control loop
/// only reads it, so no lock is needed. Eventually consistent by at most
/// one loop iteration.
pub static CONNECTED: AtomicBool = AtomicBool::new(false);

/// Advertising-start requests from the control loop. A `Signal` collapses
/// bursts into one pending request; kicking while already advertising is a
/// no-op by construction.
pub static ADV_KICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Outbound notifications, control loop -> notify pump. Fire-and-forget:
/// the loop drops messages when the queue is full.
pub static OUTBOX: Channel<CriticalSectionRawMutex, OutboundMessage, OUTBOX_CAPACITY> =
    Channel::new();

#[nrf_softdevice::gatt_service(uuid = "4fafc201-1fb5-459e-8fcc-c5c9c331914b")]
pub struct ControlService {
    /// Encoder report: ASCII `"<position>,<flag>"`. Writable per the
    /// original wire contract, but inbound writes are ignored.
    #[characteristic(uuid = "beb5483e-36e1-4688-b7f5-ea07361b26a8", read, write, notify)]
    report: heapless::Vec<u8, 16>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub control: ControlService,
}

/// SoftDevice configuration for a single-link peripheral.
pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

// Flags + the 128-bit service UUID (little-endian). The device name rides
// in the scan response; both together would not fit in 31 bytes.
#[rustfmt::skip]
static ADV_DATA: &[u8] = &[
    0x02, 0x01, raw::BLE_GAP_ADV_FLAGS_LE_ONLY_GENERAL_DISC_MODE as u8,
    0x11, 0x07, 0x4b, 0x91, 0x31, 0xc3, 0xc9, 0xc5, 0xcc, 0x8f,
                0x9e, 0x45, 0xb5, 0x1f, 0x01, 0xc2, 0xaf, 0x4f,
];
#[rustfmt::skip]
static SCAN_DATA: &[u8] = &[
    0x11, 0x09, b'O', b't', b'h', b'e', b'r', b' ', b'H', b'a',
                b'n', b'd', b' ', b'H', b'T', b'N', b'2', b'5',
];

/// Advertise on demand, then serve the connection until it drops.
///
/// Each pass waits for an advertising kick, so a failed or cancelled
/// attempt is retried by the control loop's next request rather than by a
/// local busy loop.
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    loop {
        ADV_KICK.wait().await;

        let config = peripheral::Config::default();
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: ADV_DATA,
            scan_data: SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("advertising failed: {}", e);
                continue;
            }
        };

        info!("central connected");
        CONNECTED.store(true, Ordering::Relaxed);
        serve(server, &conn).await;
        CONNECTED.store(false, Ordering::Relaxed);
        info!("central disconnected");
    }
}

/// Run the GATT server and the notify pump until the link drops.
async fn serve(server: &Server, conn: &Connection) {
    let gatt = gatt_server::run(conn, server, |e| match e {
        ServerEvent::Control(e) => match e {
            ControlServiceEvent::ReportWrite(_) => {
                // Inbound writes are out of scope; accept and discard.
            }
            ControlServiceEvent::ReportCccdWrite { notifications } => {
                info!(
                    "notifications {}",
                    if notifications { "enabled" } else { "disabled" }
                );
            }
        },
    });

    let pump = async {
        loop {
            let msg = OUTBOX.receive().await;
            let payload = msg.encode();
            let mut value = heapless::Vec::<u8, 16>::new();
            // Cannot overflow: the encoded form is bounded by the same
            // capacity as the characteristic.
            let _ = value.extend_from_slice(payload.as_bytes());
            if let Err(e) = server.control.report_notify(conn, &value) {
                // Not fatal and not retried; the message is dropped.
                warn!("notify dropped: {}", e);
            }
        }
    };

    match select(gatt, pump).await {
        Either::First(e) => info!("link closed: {}", e),
        Either::Second(_) => unreachable!(),
    }
}
