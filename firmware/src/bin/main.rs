#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Timer;
use linecmd_firmware::{
    CommandBridge, CommandParser, FirmwareBridge, Machine, UartLineSource, UartReplySink,
    COMMANDS,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

static BRIDGE: StaticCell<FirmwareBridge> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("linecmd starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    #[cfg(not(feature = "uart-flow-control"))]
    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    #[cfg(feature = "uart-flow-control")]
    let uart = Uart::new_with_rtscts(
        p.UART1,
        p.PIN_8,  // TX
        p.PIN_9,  // RX
        p.PIN_11, // RTS
        p.PIN_10, // CTS
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();

    // --- Parser Setup ---
    let mut parser = CommandParser::new();
    if let Err(e) = parser.register_all(&COMMANDS) {
        error!("Command table rejected: {:?}", e);
    }
    info!("{} commands registered", parser.registry().len());

    let bridge = BRIDGE.init(CommandBridge::new(
        UartLineSource::new(rx),
        UartReplySink::new(tx),
        parser,
        Machine::new(),
    ));

    // Optional: LED for error indication (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(command_task(bridge, led).unwrap());

    info!("linecmd initialized, waiting for lines...");
}

/// Command task - executes one line at a time and answers it.
#[embassy_executor::task]
async fn command_task(bridge: &'static mut FirmwareBridge, mut led: Output<'static>) {
    loop {
        if let Err(e) = bridge.process_one().await {
            error!("Line error: {:?}", e);
            // Toggle LED to indicate error
            led.toggle();
        }

        if let Some(ms) = bridge.context_mut().take_delay() {
            Timer::after_millis(ms).await;
        }
    }
}
