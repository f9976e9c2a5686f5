//
// Copyright (c) Memfault, Inc.
// See License.txt for details
pub mod serialization;
