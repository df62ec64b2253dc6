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

//! Partner API operations.
//!
//! Every method binds one operation to its path. Ids are percent-encoded
//! into their path segment; `options` can override headers, query parameters
//! and the operation defaults.

use crate::client::{CallOptions, Client};
use crate::constants::PATH_SEGMENT_ENCODE_SET;
use crate::encoder::Payload;
use crate::operation::Operation;
use percent_encoding::{utf8_percent_encode, PercentEncode};
use serde::Serialize;
use serde_json::Value;
use xcover_core::Result;

fn seg(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, &PATH_SEGMENT_ENCODE_SET)
}

/// Quotes.
impl Client {
    /// Create a quote.
    pub async fn create_quote<P>(&self, payload: &P, options: CallOptions) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        self.dispatch(Operation::CreateQuote, "quotes/", Some(payload), options)
            .await
    }

    /// Fetch a quote.
    pub async fn get_quote(&self, quote_id: &str, options: CallOptions) -> Result<Value> {
        let path = format!("quotes/{}/", seg(quote_id));
        self.dispatch(Operation::GetQuote, &path, None::<&Payload>, options)
            .await
    }

    /// Update a quote.
    pub async fn update_quote<P>(
        &self,
        quote_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("quotes/{}/", seg(quote_id));
        self.dispatch(Operation::UpdateQuote, &path, Some(payload), options)
            .await
    }

    /// Add quotes to an existing quote package.
    pub async fn add_quotes<P>(
        &self,
        quote_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("quotes/{}/add/", seg(quote_id));
        self.dispatch(Operation::AddQuotes, &path, Some(payload), options)
            .await
    }

    /// Remove quotes from a quote package.
    pub async fn delete_quotes<P>(
        &self,
        quote_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("quotes/{}/delete/", seg(quote_id));
        self.dispatch(Operation::DeleteQuotes, &path, Some(payload), options)
            .await
    }

    /// Record that the customer declined the offer.
    pub async fn opt_out(
        &self,
        quote_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!("quotes/{}/opt_out/", seg(quote_id));
        self.dispatch(Operation::OptOut, &path, payload, options)
            .await
    }
}

/// Bookings.
impl Client {
    /// Book a quote.
    pub async fn create_booking<P>(
        &self,
        quote_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("bookings/{}", seg(quote_id));
        self.dispatch(Operation::CreateBooking, &path, Some(payload), options)
            .await
    }

    /// Quote and book in one call.
    pub async fn instant_booking<P>(&self, payload: &P, options: CallOptions) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        self.dispatch(
            Operation::InstantBooking,
            "instant_booking/",
            Some(payload),
            options,
        )
        .await
    }

    /// Fetch a booking.
    pub async fn get_booking(&self, booking_id: &str, options: CallOptions) -> Result<Value> {
        let path = format!("bookings/{}", seg(booking_id));
        self.dispatch(Operation::GetBooking, &path, None::<&Payload>, options)
            .await
    }

    /// List bookings, filters go into `options.params`.
    pub async fn list_bookings(&self, options: CallOptions) -> Result<Value> {
        self.dispatch(
            Operation::ListBookings,
            "bookings/",
            None::<&Payload>,
            options,
        )
        .await
    }

    /// Confirm a pending booking.
    pub async fn confirm_booking(
        &self,
        booking_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!("bookings/{}/confirm/", seg(booking_id));
        self.dispatch(Operation::ConfirmBooking, &path, payload, options)
            .await
    }

    /// Ask the API to send a booking email.
    pub async fn trigger_email(
        &self,
        booking_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!("bookings/{}/send_event/", seg(booking_id));
        self.dispatch(Operation::TriggerEmail, &path, payload, options)
            .await
    }

    /// Modify a booking.
    pub async fn booking_modification<P>(
        &self,
        booking_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("bookings/{}", seg(booking_id));
        self.dispatch(Operation::BookingModification, &path, Some(payload), options)
            .await
    }

    /// Price a booking modification without applying it.
    pub async fn booking_modification_quote<P>(
        &self,
        booking_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("bookings/{}/quote_for_update/", seg(booking_id));
        self.dispatch(
            Operation::BookingModificationQuote,
            &path,
            Some(payload),
            options,
        )
        .await
    }

    /// Apply a priced modification.
    pub async fn confirm_booking_modification(
        &self,
        booking_id: &str,
        update_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!(
            "bookings/{}/confirm_update/{}/",
            seg(booking_id),
            seg(update_id)
        );
        self.dispatch(Operation::ConfirmBookingModification, &path, payload, options)
            .await
    }

    /// Cancel a booking, or price the cancellation when the payload asks for a preview.
    pub async fn cancel_booking(
        &self,
        booking_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!("bookings/{}/cancel", seg(booking_id));
        self.dispatch(Operation::CancelBooking, &path, payload, options)
            .await
    }

    /// Confirm a previewed cancellation.
    pub async fn confirm_booking_cancellation(
        &self,
        booking_id: &str,
        cancellation_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!(
            "bookings/{}/confirm_cancellation/{}/",
            seg(booking_id),
            seg(cancellation_id)
        );
        self.dispatch(Operation::ConfirmBookingCancellation, &path, payload, options)
            .await
    }
}

/// Renewals.
impl Client {
    /// Price the renewal of a booking.
    pub async fn quote_for_renewal<P>(
        &self,
        booking_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("bookings/{}/quote_for_renewal/", seg(booking_id));
        self.dispatch(Operation::QuoteForRenewal, &path, Some(payload), options)
            .await
    }

    /// Accept a renewal quote.
    pub async fn renewal_confirmation(
        &self,
        booking_id: &str,
        renewal_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!(
            "bookings/{}/confirm_renewal/{}/",
            seg(booking_id),
            seg(renewal_id)
        );
        self.dispatch(Operation::RenewalConfirmation, &path, payload, options)
            .await
    }

    /// Stop a booking from renewing.
    pub async fn renewal_opt_out(
        &self,
        booking_id: &str,
        payload: Option<&Payload>,
        options: CallOptions,
    ) -> Result<Value> {
        let path = format!("bookings/{}/renewal_opt_out/", seg(booking_id));
        self.dispatch(Operation::RenewalOptOut, &path, payload, options)
            .await
    }
}

/// Instalments.
impl Client {
    /// Fetch the instalment plan of a quote.
    pub async fn get_instalments(&self, quote_id: &str, options: CallOptions) -> Result<Value> {
        let path = format!("instalments/{}/", seg(quote_id));
        self.dispatch(Operation::GetInstalments, &path, None::<&Payload>, options)
            .await
    }

    /// Report the payment status of instalments.
    pub async fn update_instalment_payment_status<P>(
        &self,
        quote_id: &str,
        payload: &P,
        options: CallOptions,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let path = format!("instalments/{}/", seg(quote_id));
        self.dispatch(
            Operation::UpdateInstalmentPaymentStatus,
            &path,
            Some(payload),
            options,
        )
        .await
    }
}
