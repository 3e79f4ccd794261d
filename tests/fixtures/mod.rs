//! Sample documents shared by the integration tests

#![allow(dead_code)]

/// ISO 19139 metadata record with compound objects, scalar wrappers,
/// repeated properties, code lists and a nil element
pub const ISO_RECORD: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd"
                 xmlns:gco="http://www.isotc211.org/2005/gco"
                 xmlns:gml="http://www.opengis.net/gml/3.2"
                 xmlns:xlink="http://www.w3.org/1999/xlink">
  <gmd:fileIdentifier>
    <gco:CharacterString>urn:x-example:seaice:2024</gco:CharacterString>
  </gmd:fileIdentifier>
  <gmd:language>
    <gmd:LanguageCode codeList="http://www.loc.gov/standards/iso639-2/" codeListValue="eng">eng</gmd:LanguageCode>
  </gmd:language>
  <gmd:contact>
    <gmd:CI_ResponsibleParty>
      <gmd:individualName>
        <gco:CharacterString>Ann Example</gco:CharacterString>
      </gmd:individualName>
      <gmd:role>
        <gmd:CI_RoleCode codeList="#CI_RoleCode" codeListValue="pointOfContact"/>
      </gmd:role>
    </gmd:CI_ResponsibleParty>
  </gmd:contact>
  <gmd:contact>
    <gmd:CI_ResponsibleParty>
      <gmd:organisationName>
        <gco:CharacterString>Polar Data Centre</gco:CharacterString>
      </gmd:organisationName>
      <gmd:role xlink:href="#author"/>
    </gmd:CI_ResponsibleParty>
  </gmd:contact>
  <gmd:dateStamp>
    <gco:DateTime>2024-03-01T12:00:00Z</gco:DateTime>
  </gmd:dateStamp>
  <gmd:metadataStandardVersion gco:nilReason="missing"/>
  <gmd:referenceSystemInfo/>
  <gmd:extent>
    <gml:TimePeriod gml:id="tp1">
      <gml:beginPosition>2024-01-01</gml:beginPosition>
      <gml:endPosition indeterminatePosition="now"/>
    </gml:TimePeriod>
  </gmd:extent>
</gmd:MD_Metadata>"##;

/// SensorML fragment with a record list of homogeneous inputs
pub const SENSOR_RECORD: &str = r#"<sml:System xmlns:sml="http://www.opengis.net/sensorml/2.0"
            xmlns:swe="http://www.opengis.net/swe/2.0">
  <sml:identifier>buoy-17</sml:identifier>
  <sml:inputList>
    <sml:input name="temperature">
      <swe:Quantity definition="urn:ogc:def:property:temperature"/>
    </sml:input>
    <sml:input name="pressure">
      <swe:Quantity definition="urn:ogc:def:property:pressure"/>
    </sml:input>
    <sml:input name="salinity">
      <swe:Quantity definition="urn:ogc:def:property:salinity"/>
    </sml:input>
  </sml:inputList>
</sml:System>"#;

/// Document with a default namespace, nested declarations, entities and
/// interleaved repeated siblings
pub const MISC_RECORD: &str = r#"<catalog xmlns="urn:example:catalog" version="2">
  <entry id="1">
    <title>Fish &amp; Chips</title>
    <note xmlns:n="urn:example:note" n:lang="en">first</note>
  </entry>
  <comment>between</comment>
  <entry id="2">
    <title>Tea</title>
    <value>42</value>
    <empty/>
  </entry>
  <entry/>
</catalog>"#;
