//! Embedded entry point for the nRF52840 build.
//!
//! Wiring: one cooperative control loop polls the encoder and both buttons,
//! feeds the pure [`Controller`] core, commits the resulting frame to the
//! WS2812 strip, and forwards the core's requests (advertising kicks,
//! outbound notifications) to the BLE task. All radio work runs in separate
//! tasks; the loop itself never blocks on the stack.

#![no_std]
#![no_main]

use core::sync::atomic::Ordering;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_nrf::{bind_interrupts, peripherals, spim};
use embassy_time::{Instant, Timer};
use nrf_softdevice::Softdevice;
use otherhand::ble::{self, ADV_KICK, CONNECTED, OUTBOX};
use otherhand::config::{BUTTON_SETTLE_MS, LOOP_TICK_MS, NUM_LEDS};
use otherhand::{Controller, Inputs};
use smart_leds::SmartLedsWriteAsync;
use static_cell::StaticCell;
use ws2812_async::{Grb, Ws2812};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Interrupt priorities 0, 1 and 4 are reserved by the SoftDevice.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    let sd = Softdevice::enable(&ble::softdevice_config());
    static SERVER: StaticCell<ble::Server> = StaticCell::new();
    let server = SERVER.init(unwrap!(ble::Server::new(sd)));
    unwrap!(spawner.spawn(ble::softdevice_task(sd)));
    unwrap!(spawner.spawn(ble::ble_task(sd, server)));

    // Inputs: pull-up, active-low. The pin map is documented in config.rs.
    let clk = Input::new(p.P0_11, Pull::Up);
    let dt = Input::new(p.P0_12, Pull::Up);
    let mode_button = Input::new(p.P0_24, Pull::Up);
    let send_button = Input::new(p.P0_25, Pull::Up);

    // WS2812 over SPIM: at 4 MHz each LED bit becomes four SPI bits.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M4;
    let spi = spim::Spim::new_txonly_nosck(p.SPI3, Irqs, p.P0_06, spi_config);
    let mut leds: Ws2812<_, Grb, { 12 * NUM_LEDS }> = Ws2812::new(spi);

    let sample = |now_ms: u64| Inputs {
        clk: clk.is_high(),
        dt: dt.is_high(),
        mode_button: mode_button.is_high(),
        send_button: send_button.is_high(),
        now_ms,
    };

    let mut controller = Controller::new(&sample(0));
    info!("controller ready, waiting for a central");

    loop {
        let now_ms = Instant::now().as_millis();
        let connected = CONNECTED.load(Ordering::Relaxed);
        let step = controller.step(&sample(now_ms), connected);

        if let Some(event) = step.connection_event {
            info!("link: {}", event);
        }
        if step.advertise {
            ADV_KICK.signal(());
        }
        if let Some(msg) = step.notification {
            if OUTBOX.try_send(msg).is_err() {
                warn!("outbox full, dropping notification");
            }
        }
        if leds.write(step.frame).await.is_err() {
            warn!("LED strip write failed");
        }

        if step.button_edge {
            Timer::after_millis(BUTTON_SETTLE_MS).await;
        }
        Timer::after_millis(LOOP_TICK_MS).await;
    }
}
