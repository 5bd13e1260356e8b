//! Command dispatch
//!
//! Each decoded request is routed through [`handler_for`] to at most one
//! handler. Commands without a handler (client-local ones and unknown
//! ordinals) are logged and dropped. Handlers never fail: send errors are
//! logged per target and the room keeps going.

use std::net::SocketAddr;
use std::sync::Arc;

use super::instance::spawn_room;
use super::store::MessageStore;
use super::subscribers::SubscriberSet;
use crate::protocol::{self, ChatMessage, Command};
use crate::registry::{RoomId, RoomRegistry};
use crate::server::config::ServerConfig;
use crate::transport::Transport;

/// Server-side handler of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Post,
    Get,
    Subscribe,
    Unsubscribe,
    Stop,
    CreateRoom,
    ListRooms,
}

/// Look up the handler for a command
///
/// `HELP` and `QUIT` are handled by the client and have no server handler.
pub fn handler_for(command: Command) -> Option<Handler> {
    match command {
        Command::Post => Some(Handler::Post),
        Command::Get => Some(Handler::Get),
        Command::Subscribe => Some(Handler::Subscribe),
        Command::Unsubscribe => Some(Handler::Unsubscribe),
        Command::Stop => Some(Handler::Stop),
        Command::CreateRoom => Some(Handler::CreateRoom),
        Command::ListRooms => Some(Handler::ListRooms),
        Command::Help | Command::Quit | Command::Unknown(_) => None,
    }
}

/// Room state a handler may touch
pub struct RoomContext<'a, T: Transport> {
    /// Room ID, for log fields
    pub id: RoomId,
    pub transport: &'a T,
    pub subscribers: &'a mut SubscriberSet,
    pub store: &'a mut MessageStore,
    pub registry: &'a Arc<RoomRegistry>,
    /// Config the room was started with; new rooms inherit it
    pub config: &'a ServerConfig,
}

/// Run the handler for `message`, if there is one
pub async fn dispatch<T: Transport>(
    ctx: &mut RoomContext<'_, T>,
    message: ChatMessage,
    sender: SocketAddr,
) {
    let Some(handler) = handler_for(message.command()) else {
        tracing::debug!(
            room = ctx.id,
            peer = %sender,
            command = %message.command(),
            "No handler for command, dropping"
        );
        return;
    };

    match handler {
        Handler::Post => post(ctx, message).await,
        Handler::Get => get(ctx, sender).await,
        Handler::Subscribe => subscribe(ctx, sender),
        Handler::Unsubscribe => unsubscribe(ctx, sender),
        Handler::Stop => stop(ctx, sender),
        Handler::CreateRoom => create_room(ctx, sender),
        Handler::ListRooms => list_rooms(ctx, sender).await,
    }
}

async fn post<T: Transport>(ctx: &mut RoomContext<'_, T>, message: ChatMessage) {
    let stored = ctx.store.push(message.into_response());
    tracing::info!(
        room = ctx.id,
        nickname = stored.nickname(),
        subscribers = ctx.subscribers.len(),
        "Message stored"
    );

    let frame = match protocol::encode(stored) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(room = ctx.id, error = %e, "Stored message cannot be relayed");
            return;
        }
    };

    for &subscriber in ctx.subscribers.iter() {
        send_frame(ctx.transport, ctx.id, &frame, subscriber).await;
    }
}

async fn get<T: Transport>(ctx: &mut RoomContext<'_, T>, sender: SocketAddr) {
    for message in ctx.store.iter() {
        match protocol::encode(message) {
            Ok(frame) => send_frame(ctx.transport, ctx.id, &frame, sender).await,
            Err(e) => {
                tracing::warn!(room = ctx.id, error = %e, "Stored message cannot be sent");
            }
        }
    }
}

fn subscribe<T: Transport>(ctx: &mut RoomContext<'_, T>, sender: SocketAddr) {
    if ctx.subscribers.insert(sender) {
        tracing::info!(
            room = ctx.id,
            peer = %sender,
            subscribers = ctx.subscribers.len(),
            "Subscribed"
        );
    }
}

fn unsubscribe<T: Transport>(ctx: &mut RoomContext<'_, T>, sender: SocketAddr) {
    if ctx.subscribers.remove(&sender) {
        tracing::info!(
            room = ctx.id,
            peer = %sender,
            subscribers = ctx.subscribers.len(),
            "Unsubscribed"
        );
    }
}

fn stop<T: Transport>(ctx: &mut RoomContext<'_, T>, sender: SocketAddr) {
    tracing::info!(room = ctx.id, peer = %sender, "Stop requested");
    ctx.transport.close();
}

fn create_room<T: Transport>(ctx: &mut RoomContext<'_, T>, sender: SocketAddr) {
    tracing::info!(room = ctx.id, peer = %sender, "Room creation requested");
    spawn_room(ctx.config.clone().port(0), Arc::clone(ctx.registry));
}

async fn list_rooms<T: Transport>(ctx: &mut RoomContext<'_, T>, sender: SocketAddr) {
    let ports: Vec<String> = ctx
        .registry
        .ports()
        .await
        .iter()
        .map(u16::to_string)
        .collect();

    let reply = ChatMessage::server_response(Command::ListRooms, ports.join("\n"));
    match protocol::encode(&reply) {
        Ok(frame) => send_frame(ctx.transport, ctx.id, &frame, sender).await,
        Err(e) => {
            tracing::warn!(room = ctx.id, rooms = ports.len(), error = %e, "Room list too large");
        }
    }
}

/// Best-effort send of one frame
async fn send_frame<T: Transport>(transport: &T, room: RoomId, frame: &[u8], target: SocketAddr) {
    match transport.send_to(frame, target).await {
        Ok(bytes) => {
            tracing::debug!(room = room, peer = %target, bytes = bytes, "Sent frame");
        }
        Err(e) => {
            tracing::warn!(room = room, peer = %target, error = %e, "Send failed");
        }
    }
}
