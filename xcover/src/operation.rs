// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use http::Method;
use std::fmt;

/// Operations of the partner API.
///
/// Each operation fixes its HTTP verb and whether an idempotency key is
/// injected and auto-retry is used when the caller does not say otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Operation {
    /// `POST quotes/`
    CreateQuote,
    /// `GET quotes/{quote_id}/`
    GetQuote,
    /// `PATCH quotes/{quote_id}/`
    UpdateQuote,
    /// `POST quotes/{quote_id}/add/`
    AddQuotes,
    /// `POST quotes/{quote_id}/delete/`
    DeleteQuotes,
    /// `POST quotes/{quote_id}/opt_out/`
    OptOut,
    /// `POST bookings/{quote_id}`
    CreateBooking,
    /// `POST instant_booking/`
    InstantBooking,
    /// `GET bookings/{booking_id}`
    GetBooking,
    /// `GET bookings/`
    ListBookings,
    /// `POST bookings/{booking_id}/confirm/`
    ConfirmBooking,
    /// `POST bookings/{booking_id}/send_event/`
    TriggerEmail,
    /// `PATCH bookings/{booking_id}`
    BookingModification,
    /// `PATCH bookings/{booking_id}/quote_for_update/`
    BookingModificationQuote,
    /// `POST bookings/{booking_id}/confirm_update/{update_id}/`
    ConfirmBookingModification,
    /// `POST bookings/{booking_id}/cancel`
    CancelBooking,
    /// `POST bookings/{booking_id}/confirm_cancellation/{cancellation_id}/`
    ConfirmBookingCancellation,
    /// `POST bookings/{booking_id}/quote_for_renewal/`
    QuoteForRenewal,
    /// `POST bookings/{booking_id}/confirm_renewal/{renewal_id}/`
    RenewalConfirmation,
    /// `POST bookings/{booking_id}/renewal_opt_out/`
    RenewalOptOut,
    /// `GET instalments/{quote_id}/`
    GetInstalments,
    /// `PATCH instalments/{quote_id}/`
    UpdateInstalmentPaymentStatus,
}

impl Operation {
    /// Name of the operation, used in logs.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateQuote => "create_quote",
            Operation::GetQuote => "get_quote",
            Operation::UpdateQuote => "update_quote",
            Operation::AddQuotes => "add_quotes",
            Operation::DeleteQuotes => "delete_quotes",
            Operation::OptOut => "opt_out",
            Operation::CreateBooking => "create_booking",
            Operation::InstantBooking => "instant_booking",
            Operation::GetBooking => "get_booking",
            Operation::ListBookings => "list_bookings",
            Operation::ConfirmBooking => "confirm_booking",
            Operation::TriggerEmail => "trigger_email",
            Operation::BookingModification => "booking_modification",
            Operation::BookingModificationQuote => "booking_modification_quote",
            Operation::ConfirmBookingModification => "confirm_booking_modification",
            Operation::CancelBooking => "cancel_booking",
            Operation::ConfirmBookingCancellation => "confirm_booking_cancellation",
            Operation::QuoteForRenewal => "quote_for_renewal",
            Operation::RenewalConfirmation => "renewal_confirmation",
            Operation::RenewalOptOut => "renewal_opt_out",
            Operation::GetInstalments => "get_instalments",
            Operation::UpdateInstalmentPaymentStatus => "update_instalment_payment_status",
        }
    }

    /// HTTP verb of the operation.
    pub(crate) fn method(&self) -> Method {
        match self {
            Operation::GetQuote
            | Operation::GetBooking
            | Operation::ListBookings
            | Operation::GetInstalments => Method::GET,
            Operation::UpdateQuote
            | Operation::BookingModification
            | Operation::BookingModificationQuote
            | Operation::UpdateInstalmentPaymentStatus => Method::PATCH,
            _ => Method::POST,
        }
    }

    /// Whether the operation only reads.
    pub(crate) fn is_read(&self) -> bool {
        self.method() == Method::GET
    }

    /// Inject an `x-idempotency-key` unless told otherwise.
    ///
    /// Reads never get one, and neither does quote creation.
    pub(crate) fn idempotency_key(&self) -> bool {
        !self.is_read() && *self != Operation::CreateQuote
    }

    /// Retry transient failures unless told otherwise.
    pub(crate) fn auto_retry(&self) -> bool {
        !self.is_read()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
