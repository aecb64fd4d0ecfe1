//! MIDI input for twistmap
//!
//! Connects to the controller's input port and decodes control-change
//! messages into surface events. The midir callback only decodes and
//! enqueues; the run loop drains the channel, so events are dispatched
//! strictly in arrival order on a single thread.

use std::sync::mpsc::{self, Receiver};

use anyhow::{anyhow, Result};
use midir::{Ignore, MidiInput, MidiInputConnection};

/// A decoded controller event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceEvent {
    /// Flat encoder/button index as transmitted by the surface
    pub control_number: u8,
    /// MIDI channel, classified by the channel map
    pub channel: u8,
    /// Controller value, 0-127
    pub value: u8,
}

/// Decode a raw MIDI message into a surface event.
///
/// Only control change messages (`0xB0 | channel, controller, value`) are
/// of interest; everything else returns `None`.
pub fn decode_message(msg: &[u8]) -> Option<SurfaceEvent> {
    if msg.len() < 3 {
        return None;
    }
    if msg[0] & 0xF0 != 0xB0 {
        return None;
    }

    Some(SurfaceEvent {
        control_number: msg[1] & 0x7F,
        channel: msg[0] & 0x0F,
        value: msg[2] & 0x7F,
    })
}

/// An open MIDI input connection delivering surface events.
pub struct SurfaceInput {
    // Held to keep the connection alive
    _conn: MidiInputConnection<()>,
    receiver: Receiver<SurfaceEvent>,
    port_name: String,
}

impl SurfaceInput {
    /// Connect to the given port (matched by substring), or the first
    /// available port when no name is given.
    pub fn connect(port_name: Option<&str>) -> Result<Self> {
        let mut midi_in = MidiInput::new("twistmap input")?;
        midi_in.ignore(Ignore::All);

        let ports = midi_in.ports();
        if ports.is_empty() {
            return Err(anyhow!("No MIDI input ports available"));
        }

        let port = if let Some(name) = port_name {
            ports
                .iter()
                .find(|p| {
                    midi_in
                        .port_name(p)
                        .map(|n| n.contains(name))
                        .unwrap_or(false)
                })
                .ok_or_else(|| anyhow!("MIDI port '{}' not found", name))?
                .clone()
        } else {
            ports[0].clone()
        };

        let port_name_actual = midi_in.port_name(&port)?;
        let (sender, receiver) = mpsc::channel();

        let conn = midi_in
            .connect(
                &port,
                "twistmap-input",
                move |_timestamp, msg, _| {
                    if let Some(event) = decode_message(msg) {
                        let _ = sender.send(event);
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("Failed to connect to MIDI port: {e}"))?;

        Ok(Self {
            _conn: conn,
            receiver,
            port_name: port_name_actual,
        })
    }

    /// Name of the connected port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Receiver side of the event queue
    pub fn events(&self) -> &Receiver<SurfaceEvent> {
        &self.receiver
    }
}

/// List available MIDI input ports.
pub fn list_midi_ports() -> Result<Vec<String>> {
    let midi_in = MidiInput::new("twistmap list")?;
    let ports = midi_in.ports();

    let names: Vec<String> = ports
        .iter()
        .filter_map(|p| midi_in.port_name(p).ok())
        .collect();

    Ok(names)
}
